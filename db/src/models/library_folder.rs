use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, QueryFilter, Set};

/// Folder in the content library.
///
/// `category` is data, not code: one table serves every subject area
/// (grammar, literature, paper bank, grade materials, ...). Folders nest via
/// `parent_id` within the same category.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "library_folders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category: String,
    pub name: String,
    pub parent_id: Option<i64>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
    #[sea_orm(has_many = "super::library_file::Entity")]
    Files,
}

impl Related<super::library_file::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Files.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        category: &str,
        name: &str,
        parent_id: Option<i64>,
        created_by: i64,
    ) -> Result<Model, DbErr> {
        let now = Utc::now();
        let folder = ActiveModel {
            category: Set(category.to_owned()),
            name: Set(name.to_owned()),
            parent_id: Set(parent_id),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        folder.insert(db).await
    }

    /// Finds a folder only if it belongs to the given category.
    pub async fn find_in_category(
        db: &DatabaseConnection,
        category: &str,
        id: i64,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Id.eq(id))
            .filter(Column::Category.eq(category))
            .one(db)
            .await
    }
}
