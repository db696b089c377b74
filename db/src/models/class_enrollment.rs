use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, QueryFilter, Set};

/// Membership of a student in a class.
///
/// `monitor` grants permission to submit and edit attendance for the class on
/// staff's behalf. `fee_exempt` is the per-student free-class membership; it
/// combines with the class-level `free_class` flag when deriving payment
/// liability.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "class_enrollments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub class_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,

    pub monitor: bool,
    pub fee_exempt: bool,
    pub created_at: DateTime<Utc>,
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
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::class::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Class.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn enroll(
        db: &DatabaseConnection,
        class_id: i64,
        user_id: i64,
        monitor: bool,
        fee_exempt: bool,
    ) -> Result<Model, DbErr> {
        let enrollment = ActiveModel {
            class_id: Set(class_id),
            user_id: Set(user_id),
            monitor: Set(monitor),
            fee_exempt: Set(fee_exempt),
            created_at: Set(Utc::now()),
        };
        enrollment.insert(db).await
    }

    pub async fn find(
        db: &DatabaseConnection,
        class_id: i64,
        user_id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await
    }

    pub async fn is_enrolled(
        db: &DatabaseConnection,
        class_id: i64,
        user_id: i64,
    ) -> Result<bool, DbErr> {
        Ok(Self::find(db, class_id, user_id).await?.is_some())
    }

    /// True when the user is enrolled in the class with the monitor flag set.
    pub async fn is_monitor(
        db: &DatabaseConnection,
        class_id: i64,
        user_id: i64,
    ) -> Result<bool, DbErr> {
        Ok(Self::find(db, class_id, user_id)
            .await?
            .map(|e| e.monitor)
            .unwrap_or(false))
    }

    /// All user ids enrolled in the class.
    pub async fn student_ids_for_class(
        db: &DatabaseConnection,
        class_id: i64,
    ) -> Result<Vec<i64>, DbErr> {
        Ok(Entity::find()
            .filter(Column::ClassId.eq(class_id))
            .all(db)
            .await?
            .into_iter()
            .map(|e| e.user_id)
            .collect())
    }
}
