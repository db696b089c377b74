use std::future::Future;
use std::pin::Pin;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::seed::Seeder;
use db::models::{
    class::Model as ClassModel,
    class_enrollment::Model as EnrollmentModel,
    user::{Column as UserCol, Entity as UserEntity},
};

pub struct ClassSeeder;

impl Seeder for ClassSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DbErr>> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::seed_from_u64(42);

            let specs = [
                ("Grade 10 Maths", "10", "maths", 2000i64, false),
                ("Grade 10 Science", "10", "science", 2000, false),
                ("Grade 11 Maths", "11", "maths", 2500, false),
                ("Grade 11 Literature", "11", "literature", 1800, false),
                ("Scholarship Clinic", "10", "maths", 0, true),
            ];

            let students: Vec<i64> = UserEntity::find()
                .filter(UserCol::Admin.eq(false))
                .filter(UserCol::Approved.eq(true))
                .all(db)
                .await?
                .into_iter()
                .map(|u| u.id)
                .collect();

            for (name, grade, category, fee, free_class) in specs {
                let class = ClassModel::create(db, name, grade, category, fee, free_class).await?;

                let mut pool = students.clone();
                pool.shuffle(&mut rng);
                let take = rng.gen_range(8..=pool.len().min(14));

                for (i, student_id) in pool.into_iter().take(take).enumerate() {
                    // First pick becomes the class monitor.
                    let monitor = i == 0;
                    let fee_exempt = !free_class && rng.gen_bool(0.1);
                    EnrollmentModel::enroll(db, class.id, student_id, monitor, fee_exempt)
                        .await?;
                }
            }

            Ok(())
        })
    }
}
