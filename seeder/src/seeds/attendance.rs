use std::future::Future;
use std::pin::Pin;

use chrono::{Duration, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};

use crate::seed::Seeder;
use db::models::{
    attendance_entry::{self, AttendanceStatus},
    attendance_sheet::Model as SheetModel,
    class::Entity as ClassEntity,
    class_enrollment::Model as EnrollmentModel,
    user::{Column as UserCol, Entity as UserEntity},
};

pub struct AttendanceSeeder;

impl Seeder for AttendanceSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DbErr>> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::seed_from_u64(7);

            let staff_id = UserEntity::find()
                .filter(UserCol::Admin.eq(true))
                .one(db)
                .await?
                .map(|u| u.id)
                .ok_or_else(|| DbErr::Custom("run UserSeeder first".into()))?;

            let classes = ClassEntity::find().all(db).await?;

            for class in classes {
                let roster = EnrollmentModel::student_ids_for_class(db, class.id).await?;

                // Weekly sessions over the trailing twelve weeks.
                for week in 1..=12i64 {
                    let session_date = Utc::now() - Duration::weeks(week);
                    let sheet =
                        SheetModel::create(db, class.id, staff_id, session_date).await?;

                    for &student_id in &roster {
                        let status = if rng.gen_bool(0.85) {
                            AttendanceStatus::Present
                        } else {
                            AttendanceStatus::Absent
                        };
                        attendance_entry::ActiveModel {
                            sheet_id: Set(sheet.id),
                            student_id: Set(student_id),
                            status: Set(status),
                        }
                        .insert(db)
                        .await?;
                    }
                }
            }

            Ok(())
        })
    }
}
