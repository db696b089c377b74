use std::future::Future;
use std::pin::Pin;

use fake::Fake;
use fake::faker::internet::en::Username;
use sea_orm::{DatabaseConnection, DbErr};

use crate::seed::Seeder;
use db::models::user::Model as UserModel;

pub const STUDENT_COUNT: usize = 24;

pub struct UserSeeder;

impl Seeder for UserSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DbErr>> + Send + 'a>> {
        Box::pin(async move {
            UserModel::create(db, "admin", "admin@tutor-portal.test", "admin123", true, true)
                .await?;
            UserModel::create(db, "clerk", "clerk@tutor-portal.test", "clerk123", true, true)
                .await?;

            for i in 0..STUDENT_COUNT {
                let base: String = Username().fake();
                let username = format!("{base}{i:02}");
                let email = format!("{username}@tutor-portal.test");
                // A couple of unapproved registrations for the approval flow.
                let approved = i % 8 != 7;
                UserModel::create(db, &username, &email, "password123", false, approved).await?;
            }

            Ok(())
        })
    }
}
