use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, PaginatorTrait, QueryFilter, Set};

use super::attendance_entry::{self, AttendanceStatus};

/// One attendance sheet per class session.
///
/// Identity is (class, calendar day); entries stay mutable until the sheet is
/// finalized.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "attendance_sheets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub created_by: i64,
    pub session_date: DateTime<Utc>,
    pub finalized: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class::Entity",
        from = "Column::ClassId",
        to = "super::class::Column::Id"
    )]
    Class,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::attendance_entry::Entity")]
    Entries,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::attendance_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Present/total session counts for one student over one calendar month.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct MonthAttendance {
    pub present_days: i64,
    pub total_class_days: i64,
}

/// Inclusive UTC bounds of a calendar month: first day 00:00:00 through the
/// last day 23:59:59.
pub fn month_bounds(year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let next_start = Utc.with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0).single()?;
    Some((start, next_start - Duration::seconds(1)))
}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        class_id: i64,
        created_by: i64,
        session_date: DateTime<Utc>,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let sheet = ActiveModel {
            class_id: Set(class_id),
            created_by: Set(created_by),
            session_date: Set(session_date),
            finalized: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        sheet.insert(db).await
    }

    /// Finds a sheet for the class on the same calendar day as `date`.
    pub async fn find_for_day(
        db: &DatabaseConnection,
        class_id: i64,
        date: DateTime<Utc>,
    ) -> Result<Option<Model>, DbErr> {
        let day_start = Utc
            .with_ymd_and_hms(date.year(), date.month(), date.day(), 0, 0, 0)
            .single()
            .ok_or_else(|| DbErr::Custom("invalid session date".into()))?;
        let day_end = day_start + Duration::seconds(86_399);
        Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::SessionDate.between(day_start, day_end))
            .one(db)
            .await
    }

    /// Counts how many sessions the class held in the month and how many of
    /// them the student was marked present for.
    ///
    /// A sheet with no entry for the student contributes to
    /// `total_class_days` only; the student is implicitly absent. Database
    /// errors propagate so callers can tell "no classes held" apart from a
    /// failed query.
    pub async fn month_attendance(
        db: &DatabaseConnection,
        class_id: i64,
        student_id: i64,
        year: i32,
        month: u32,
    ) -> Result<MonthAttendance, DbErr> {
        let (start, end) = month_bounds(year, month)
            .ok_or_else(|| DbErr::Custom(format!("invalid month: {year}-{month}")))?;

        let sheet_ids: Vec<i64> = Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::SessionDate.between(start, end))
            .all(db)
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        let total_class_days = sheet_ids.len() as i64;
        if sheet_ids.is_empty() {
            return Ok(MonthAttendance::default());
        }

        let present_days = attendance_entry::Entity::find()
            .filter(attendance_entry::Column::SheetId.is_in(sheet_ids))
            .filter(attendance_entry::Column::StudentId.eq(student_id))
            .filter(attendance_entry::Column::Status.eq(AttendanceStatus::Present))
            .count(db)
            .await? as i64;

        Ok(MonthAttendance {
            present_days,
            total_class_days,
        })
    }
}
