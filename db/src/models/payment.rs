use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, IntoActiveModel, QueryFilter, Set, SqlErr,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::attendance_sheet::MonthAttendance;

/// A monthly fee payment request.
///
/// At most one row exists per (student, class, year, month); the unique index
/// created by the payments migration enforces this under concurrent
/// submissions. `present_days`/`total_class_days` are the attendance snapshot
/// captured when the request was submitted.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub class_id: i64,
    pub year: i32,
    pub month: i32,
    pub amount: i64,
    pub receipt_reference: String,
    pub note: Option<String>,
    pub status: PaymentStatus,
    pub present_days: i64,
    pub total_class_days: i64,
    pub action_by: Option<i64>,
    pub action_date: Option<DateTime<Utc>>,
    pub action_note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle state of a payment request: `pending` until staff decide,
/// then `approved` or `rejected`.
///
/// Stored and emitted lowercase; parsing is ASCII-case-insensitive so
/// historical capitalized payloads ("Approved") remain accepted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_status")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,

    #[sea_orm(string_value = "approved")]
    Approved,

    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Submission failure taxonomy: the duplicate case maps to a 400 at the API
/// layer, everything else to a 500.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("a payment for this month already exists")]
    AlreadyExists,
    #[error(transparent)]
    Db(#[from] DbErr),
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::StudentId",
        to = "super::user::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a pending payment request with its attendance snapshot.
    ///
    /// The existence pre-check yields the friendly duplicate error; losing a
    /// race to another submission surfaces as a unique-constraint violation
    /// from the insert and maps to the same variant.
    pub async fn submit(
        db: &DatabaseConnection,
        student_id: i64,
        class_id: i64,
        year: i32,
        month: i32,
        amount: i64,
        receipt_reference: &str,
        note: Option<&str>,
        attendance: MonthAttendance,
    ) -> Result<Model, SubmitError> {
        if Self::find_for_month(db, student_id, class_id, year, month)
            .await?
            .is_some()
        {
            return Err(SubmitError::AlreadyExists);
        }

        let now = Utc::now();
        let payment = ActiveModel {
            student_id: Set(student_id),
            class_id: Set(class_id),
            year: Set(year),
            month: Set(month),
            amount: Set(amount),
            receipt_reference: Set(receipt_reference.to_owned()),
            note: Set(note.map(str::to_owned)),
            status: Set(PaymentStatus::Pending),
            present_days: Set(attendance.present_days),
            total_class_days: Set(attendance.total_class_days),
            action_by: Set(None),
            action_date: Set(None),
            action_note: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        payment.insert(db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                SubmitError::AlreadyExists
            } else {
                SubmitError::Db(e)
            }
        })
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_for_month(
        db: &DatabaseConnection,
        student_id: i64,
        class_id: i64,
        year: i32,
        month: i32,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Year.eq(year))
            .filter(Column::Month.eq(month))
            .one(db)
            .await
    }

    /// All payments for a class covering one month, keyed later by student.
    pub async fn find_for_class_month(
        db: &DatabaseConnection,
        class_id: i64,
        year: i32,
        month: i32,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Year.eq(year))
            .filter(Column::Month.eq(month))
            .all(db)
            .await
    }

    /// Applies a staff decision to this payment, stamping the audit fields.
    ///
    /// Intentionally not restricted to pending rows: a decided request may be
    /// re-processed.
    pub async fn process(
        self,
        db: &DatabaseConnection,
        status: PaymentStatus,
        actor_id: i64,
        action_note: Option<&str>,
    ) -> Result<Model, DbErr> {
        let mut payment = self.into_active_model();
        payment.status = Set(status);
        payment.action_by = Set(Some(actor_id));
        payment.action_date = Set(Some(Utc::now()));
        payment.action_note = Set(action_note.map(str::to_owned));
        payment.updated_at = Set(Utc::now());
        payment.update(db).await
    }

    /// Applies one decision to many payments in a single multi-row update.
    ///
    /// Atomic per row, not as a set; prior per-row state is not checked.
    /// Returns the number of rows modified.
    pub async fn bulk_process(
        db: &DatabaseConnection,
        ids: &[i64],
        status: PaymentStatus,
        actor_id: i64,
        action_note: Option<&str>,
    ) -> Result<u64, DbErr> {
        if ids.is_empty() {
            return Ok(0);
        }
        let now = Utc::now();
        let result = Entity::update_many()
            .col_expr(Column::Status, Expr::value(status))
            .col_expr(Column::ActionBy, Expr::value(actor_id))
            .col_expr(Column::ActionDate, Expr::value(now))
            .col_expr(Column::ActionNote, Expr::value(action_note.map(str::to_owned)))
            .col_expr(Column::UpdatedAt, Expr::value(now))
            .filter(Column::Id.is_in(ids.to_vec()))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
