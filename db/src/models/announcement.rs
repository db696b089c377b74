use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set};

/// Class-scoped announcement, authored by staff.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub pinned: bool,
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
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Author,
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
    pub async fn create(
        db: &DatabaseConnection,
        class_id: i64,
        user_id: i64,
        title: &str,
        body: &str,
        pinned: bool,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let announcement = ActiveModel {
            class_id: Set(class_id),
            user_id: Set(user_id),
            title: Set(title.to_owned()),
            body: Set(body.to_owned()),
            pinned: Set(pinned),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        announcement.insert(db).await
    }

    pub async fn edit(
        self,
        db: &DatabaseConnection,
        title: &str,
        body: &str,
        pinned: bool,
    ) -> Result<Model, DbErr> {
        let mut announcement = self.into_active_model();
        announcement.title = Set(title.to_owned());
        announcement.body = Set(body.to_owned());
        announcement.pinned = Set(pinned);
        announcement.updated_at = Set(Utc::now());
        announcement.update(db).await
    }
}
