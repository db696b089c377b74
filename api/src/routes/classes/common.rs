//! Request/response DTOs shared by the `/classes` route group.

use common::format_validation_errors;
use serde::{Deserialize, Serialize};
use validator::Validate;

use db::models::class::Model as ClassModel;

#[derive(Debug, Deserialize, Validate)]
pub struct ClassRequest {
    #[validate(length(min = 1, max = 128, message = "Class name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 16, message = "Grade is required"))]
    pub grade: String,

    #[validate(length(min = 1, max = 64, message = "Category is required"))]
    pub category: String,

    #[validate(range(min = 0, message = "Monthly fee cannot be negative"))]
    pub monthly_fee: i64,

    #[serde(default)]
    pub free_class: bool,
}

impl ClassRequest {
    pub fn validation_message(&self) -> Option<String> {
        self.validate()
            .err()
            .map(|errors| format_validation_errors(&errors))
    }
}

#[derive(Debug, Serialize, Default)]
pub struct ClassDto {
    pub id: i64,
    pub name: String,
    pub grade: String,
    pub category: String,
    pub monthly_fee: i64,
    pub free_class: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ClassModel> for ClassDto {
    fn from(class: ClassModel) -> Self {
        Self {
            id: class.id,
            name: class.name,
            grade: class.grade,
            category: class.category,
            monthly_fee: class.monthly_fee,
            free_class: class.free_class,
            created_at: class.created_at.to_rfc3339(),
            updated_at: class.updated_at.to_rfc3339(),
        }
    }
}
