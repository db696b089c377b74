use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202601150001_create_users::Migration),
            Box::new(migrations::m202601150002_create_classes::Migration),
            Box::new(migrations::m202601150003_create_class_enrollments::Migration),
            Box::new(migrations::m202601150004_create_attendance::Migration),
            Box::new(migrations::m202601150005_create_payments::Migration),
            Box::new(migrations::m202601150006_create_password_reset_tokens::Migration),
            Box::new(migrations::m202601150007_create_announcements::Migration),
            Box::new(migrations::m202601150008_create_library::Migration),
        ]
    }
}
