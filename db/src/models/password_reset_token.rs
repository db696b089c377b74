use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

/// Single-use, expiring password reset token.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, serde::Serialize)]
#[sea_orm(table_name = "password_reset_tokens")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
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
    /// Issues a fresh token for the user, valid for `expiry_minutes`.
    pub async fn create(
        db: &DatabaseConnection,
        user_id: i64,
        expiry_minutes: u64,
    ) -> Result<Model, DbErr> {
        let token = ActiveModel {
            user_id: Set(user_id),
            token: Set(Uuid::new_v4().simple().to_string()),
            expires_at: Set(Utc::now() + Duration::minutes(expiry_minutes as i64)),
            used: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        token.insert(db).await
    }

    /// Looks up an unused, unexpired token.
    pub async fn find_valid(
        db: &DatabaseConnection,
        token: &str,
    ) -> Result<Option<Model>, DbErr> {
        Entity::find()
            .filter(Column::Token.eq(token))
            .filter(Column::Used.eq(false))
            .filter(Column::ExpiresAt.gt(Utc::now()))
            .one(db)
            .await
    }

    /// Number of tokens issued for the user in the trailing hour, for
    /// request rate limiting.
    pub async fn issued_in_last_hour(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::CreatedAt.gt(Utc::now() - Duration::hours(1)))
            .count(db)
            .await
    }

    pub async fn mark_used(self, db: &DatabaseConnection) -> Result<Model, DbErr> {
        let mut token: ActiveModel = self.into();
        token.used = Set(true);
        token.update(db).await
    }
}
