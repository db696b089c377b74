use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// Represents a tutoring class.
///
/// `monthly_fee` is whole currency units; `free_class` exempts every enrolled
/// student from fee liability regardless of attendance.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub grade: String,
    pub category: String,
    pub monthly_fee: i64,
    pub free_class: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::class_enrollment::Entity")]
    Enrollments,
    #[sea_orm(has_many = "super::attendance_sheet::Entity")]
    AttendanceSheets,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::class_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::attendance_sheet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttendanceSheets.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        name: &str,
        grade: &str,
        category: &str,
        monthly_fee: i64,
        free_class: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let class = ActiveModel {
            name: Set(name.to_owned()),
            grade: Set(grade.to_owned()),
            category: Set(category.to_owned()),
            monthly_fee: Set(monthly_fee),
            free_class: Set(free_class),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        class.insert(db).await
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }
}
