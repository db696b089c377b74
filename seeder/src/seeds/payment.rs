use std::future::Future;
use std::pin::Pin;

use chrono::{Datelike, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};

use crate::seed::Seeder;
use db::models::{
    attendance_sheet::Model as SheetModel,
    class::Entity as ClassEntity,
    class_enrollment::Model as EnrollmentModel,
    payment::{Model as PaymentModel, PaymentStatus, SubmitError},
    user::{Column as UserCol, Entity as UserEntity},
};

pub struct PaymentSeeder;

impl Seeder for PaymentSeeder {
    fn seed<'a>(
        &'a self,
        db: &'a DatabaseConnection,
    ) -> Pin<Box<dyn Future<Output = Result<(), DbErr>> + Send + 'a>> {
        Box::pin(async move {
            let mut rng = StdRng::seed_from_u64(99);

            let staff_id = UserEntity::find()
                .filter(UserCol::Admin.eq(true))
                .one(db)
                .await?
                .map(|u| u.id)
                .ok_or_else(|| DbErr::Custom("run UserSeeder first".into()))?;

            let now = Utc::now();
            let classes = ClassEntity::find().all(db).await?;

            for class in classes {
                if class.free_class {
                    continue;
                }
                let roster = EnrollmentModel::student_ids_for_class(db, class.id).await?;

                // Last month's fees: most submitted, a spread of decisions.
                let (year, month) = previous_month(now.year(), now.month());
                for &student_id in &roster {
                    if rng.gen_bool(0.3) {
                        continue; // leave some unpaid for overdue views
                    }

                    let attendance = SheetModel::month_attendance(
                        db, class.id, student_id, year, month,
                    )
                    .await?;

                    let receipt = format!("rcpt-{}-{}", class.id, student_id);
                    let payment = match PaymentModel::submit(
                        db,
                        student_id,
                        class.id,
                        year,
                        month as i32,
                        class.monthly_fee,
                        &receipt,
                        None,
                        attendance,
                    )
                    .await
                    {
                        Ok(payment) => payment,
                        Err(SubmitError::AlreadyExists) => continue,
                        Err(SubmitError::Db(e)) => return Err(e),
                    };

                    let roll: f64 = rng.r#gen();
                    if roll < 0.6 {
                        payment
                            .process(db, PaymentStatus::Approved, staff_id, None)
                            .await?;
                    } else if roll < 0.75 {
                        payment
                            .process(
                                db,
                                PaymentStatus::Rejected,
                                staff_id,
                                Some("receipt unreadable"),
                            )
                            .await?;
                    }
                }
            }

            Ok(())
        })
    }
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}
