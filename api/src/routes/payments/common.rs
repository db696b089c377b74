//! DTOs and populate helpers shared by the payment route groups.
//!
//! "Populate" here means what the API consumers expect: stored foreign keys
//! are replaced with the referenced row's display fields in responses.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use std::collections::HashMap;

use db::models::attendance_sheet::MonthAttendance;
use db::models::payment::{Model as PaymentModel, PaymentStatus};
use db::models::{
    class::{Column as ClassCol, Entity as ClassEntity},
    user::{Column as UserCol, Entity as UserEntity},
};

#[derive(Debug, Clone, Serialize)]
pub struct StudentRef {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassRef {
    pub id: i64,
    pub name: String,
    pub grade: String,
}

#[derive(Debug, Serialize)]
pub struct AdminActionDto {
    pub action_by: i64,
    pub action_by_username: Option<String>,
    pub action_date: String,
    pub note: Option<String>,
}

/// A payment with its student/class references populated.
#[derive(Debug, Serialize)]
pub struct PaymentDto {
    pub id: i64,
    pub student: Option<StudentRef>,
    pub class: Option<ClassRef>,
    pub year: i32,
    pub month: i32,
    pub amount: i64,
    pub receipt_reference: String,
    pub note: Option<String>,
    pub status: PaymentStatus,
    pub attendance: MonthAttendance,
    pub admin_action: Option<AdminActionDto>,
    pub created_at: String,
    pub updated_at: String,
}

/// Resolves display fields for a batch of payments with one query per
/// referenced table.
pub async fn populate_payments(
    db: &DatabaseConnection,
    payments: Vec<PaymentModel>,
) -> Result<Vec<PaymentDto>, DbErr> {
    let mut user_ids: Vec<i64> = payments.iter().map(|p| p.student_id).collect();
    user_ids.extend(payments.iter().filter_map(|p| p.action_by));
    let class_ids: Vec<i64> = payments.iter().map(|p| p.class_id).collect();

    let mut user_map = HashMap::<i64, StudentRef>::new();
    if !user_ids.is_empty() {
        for u in UserEntity::find()
            .filter(UserCol::Id.is_in(user_ids))
            .all(db)
            .await?
        {
            user_map.insert(
                u.id,
                StudentRef {
                    id: u.id,
                    username: u.username,
                    email: u.email,
                },
            );
        }
    }

    let mut class_map = HashMap::<i64, ClassRef>::new();
    if !class_ids.is_empty() {
        for c in ClassEntity::find()
            .filter(ClassCol::Id.is_in(class_ids))
            .all(db)
            .await?
        {
            class_map.insert(
                c.id,
                ClassRef {
                    id: c.id,
                    name: c.name,
                    grade: c.grade,
                },
            );
        }
    }

    Ok(payments
        .into_iter()
        .map(|p| {
            let admin_action = match (p.action_by, p.action_date) {
                (Some(action_by), Some(action_date)) => Some(AdminActionDto {
                    action_by,
                    action_by_username: user_map.get(&action_by).map(|u| u.username.clone()),
                    action_date: action_date.to_rfc3339(),
                    note: p.action_note.clone(),
                }),
                _ => None,
            };
            PaymentDto {
                id: p.id,
                student: user_map.get(&p.student_id).cloned(),
                class: class_map.get(&p.class_id).cloned(),
                year: p.year,
                month: p.month,
                amount: p.amount,
                receipt_reference: p.receipt_reference,
                note: p.note,
                status: p.status,
                attendance: MonthAttendance {
                    present_days: p.present_days,
                    total_class_days: p.total_class_days,
                },
                admin_action,
                created_at: p.created_at.to_rfc3339(),
                updated_at: p.updated_at.to_rfc3339(),
            }
        })
        .collect())
}

pub async fn populate_payment(
    db: &DatabaseConnection,
    payment: PaymentModel,
) -> Result<PaymentDto, DbErr> {
    populate_payments(db, vec![payment])
        .await?
        .pop()
        .ok_or_else(|| DbErr::Custom("populate dropped a payment".into()))
}
