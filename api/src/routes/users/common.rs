//! Shared DTOs for the `/users` route group.

use db::models::user::Model as UserModel;
use serde::Serialize;

#[derive(Debug, Serialize, Default)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub admin: bool,
    pub approved: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserModel> for UserDto {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            admin: user.admin,
            approved: user.approved,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}
