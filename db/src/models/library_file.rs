use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

/// File entry inside a library folder.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "library_files")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub folder_id: i64,
    pub title: String,
    pub file_url: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::library_folder::Entity",
        from = "Column::FolderId",
        to = "super::library_folder::Column::Id"
    )]
    Folder,
}

impl Related<super::library_folder::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Folder.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        folder_id: i64,
        title: &str,
        file_url: &str,
        created_by: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let file = ActiveModel {
            folder_id: Set(folder_id),
            title: Set(title.to_owned()),
            file_url: Set(file_url.to_owned()),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        file.insert(db).await
    }
}
