use migration::Migrator;
use sea_orm_migration::MigratorTrait;

mod seed;
mod seeds;

use seed::run_seeder;
use seeds::{
    attendance::AttendanceSeeder, class::ClassSeeder, payment::PaymentSeeder, user::UserSeeder,
};

#[tokio::main]
async fn main() {
    let db = db::connect().await;

    Migrator::up(&db, None).await.expect("Migrations failed");

    run_seeder(&db, &UserSeeder, "users").await;
    run_seeder(&db, &ClassSeeder, "classes & enrollments").await;
    run_seeder(&db, &AttendanceSeeder, "attendance").await;
    run_seeder(&db, &PaymentSeeder, "payments").await;

    println!("Seeding complete");
}
