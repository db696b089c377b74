use axum::http::StatusCode;
use chrono::{Datelike, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tower::ServiceExt;

use api::auth::generate_jwt;
use db::models::{
    attendance_entry::{self, AttendanceStatus},
    attendance_sheet::Model as SheetModel,
    class::Model as ClassModel,
    class_enrollment::Model as EnrollmentModel,
    user::Model as UserModel,
};

use crate::helpers::app::{authed_request, make_test_app, response_json};

async fn seed_present_sessions(
    db: &DatabaseConnection,
    class_id: i64,
    staff_id: i64,
    student_id: i64,
    dates: &[chrono::DateTime<Utc>],
    present: usize,
) {
    for (i, date) in dates.iter().enumerate() {
        let sheet = SheetModel::create(db, class_id, staff_id, *date).await.unwrap();
        if i < present {
            attendance_entry::ActiveModel {
                sheet_id: Set(sheet.id),
                student_id: Set(student_id),
                status: Set(AttendanceStatus::Present),
            }
            .insert(db)
            .await
            .unwrap();
        }
    }
}

#[tokio::test]
async fn march_scenario_derives_overdue_liability() {
    let (app, db) = make_test_app().await;

    let staff = UserModel::create(&db, "view_staff", "view_staff@test.com", "password", true, true)
        .await
        .unwrap();
    let student = UserModel::create(
        &db,
        "view_student",
        "view_student@test.com",
        "password",
        false,
        true,
    )
    .await
    .unwrap();
    let class = ClassModel::create(&db, "Grade 10 Maths", "10", "maths", 2000, false)
        .await
        .unwrap();
    EnrollmentModel::enroll(&db, class.id, student.id, false, false)
        .await
        .unwrap();

    // Three March 2025 sessions, two attended; today is well past March 2025.
    seed_present_sessions(
        &db,
        class.id,
        staff.id,
        student.id,
        &[
            Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 17, 9, 0, 0).unwrap(),
        ],
        2,
    )
    .await;

    let (token, _) = generate_jwt(student.id, false);
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/payments/student/{}/2025", class.id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let months = json["data"]["months"].as_array().unwrap();
    assert_eq!(months.len(), 12);

    let march = &months[2];
    assert_eq!(march["month"], 3);
    assert_eq!(march["attendance"]["present_days"], 2);
    assert_eq!(march["attendance"]["total_class_days"], 3);
    assert_eq!(march["monthly_fee"], 2000);
    assert_eq!(march["requires_payment"], true);
    assert_eq!(march["overdue"], true);
    assert!(march["payment"].is_null());

    // January had no sessions at all.
    let january = &months[0];
    assert_eq!(january["attendance"]["present_days"], 0);
    assert_eq!(january["attendance"]["total_class_days"], 0);
    assert_eq!(january["requires_payment"], false);
    assert_eq!(january["overdue"], false);
}

#[tokio::test]
async fn current_month_is_never_overdue() {
    let (app, db) = make_test_app().await;

    let staff = UserModel::create(&db, "cur_staff", "cur_staff@test.com", "password", true, true)
        .await
        .unwrap();
    let student = UserModel::create(
        &db,
        "cur_student",
        "cur_student@test.com",
        "password",
        false,
        true,
    )
    .await
    .unwrap();
    let class = ClassModel::create(&db, "Grade 11 Science", "11", "science", 2500, false)
        .await
        .unwrap();
    EnrollmentModel::enroll(&db, class.id, student.id, false, false)
        .await
        .unwrap();

    // Two attended sessions this calendar month; days 1 and 2 always exist.
    let now = Utc::now();
    seed_present_sessions(
        &db,
        class.id,
        staff.id,
        student.id,
        &[
            Utc.with_ymd_and_hms(now.year(), now.month(), 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(now.year(), now.month(), 2, 9, 0, 0).unwrap(),
        ],
        2,
    )
    .await;

    let (token, _) = generate_jwt(student.id, false);
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/payments/student/{}/{}", class.id, now.year()),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let months = json["data"]["months"].as_array().unwrap();
    let current = &months[(now.month() - 1) as usize];
    assert_eq!(current["requires_payment"], true);
    assert_eq!(current["overdue"], false);

    // No future month is overdue either.
    for month in months.iter().skip(now.month() as usize) {
        assert_eq!(month["overdue"], false);
    }
}

#[tokio::test]
async fn fee_exempt_enrollment_suppresses_liability() {
    let (app, db) = make_test_app().await;

    let staff = UserModel::create(&db, "fx_staff", "fx_staff@test.com", "password", true, true)
        .await
        .unwrap();
    let student = UserModel::create(
        &db,
        "fx_student",
        "fx_student@test.com",
        "password",
        false,
        true,
    )
    .await
    .unwrap();
    let class = ClassModel::create(&db, "Grade 9 English", "9", "english", 1500, false)
        .await
        .unwrap();
    EnrollmentModel::enroll(&db, class.id, student.id, false, true)
        .await
        .unwrap();

    seed_present_sessions(
        &db,
        class.id,
        staff.id,
        student.id,
        &[
            Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 12, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 19, 9, 0, 0).unwrap(),
        ],
        3,
    )
    .await;

    let (token, _) = generate_jwt(student.id, false);
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/payments/student/{}/2025", class.id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let may = &json["data"]["months"].as_array().unwrap()[4];
    assert_eq!(may["attendance"]["present_days"], 3);
    assert_eq!(may["free_class"], true);
    assert_eq!(may["requires_payment"], false);
    assert_eq!(may["overdue"], false);
}

#[tokio::test]
async fn year_view_requires_enrollment() {
    let (app, db) = make_test_app().await;

    let outsider = UserModel::create(
        &db,
        "yv_outsider",
        "yv_outsider@test.com",
        "password",
        false,
        true,
    )
    .await
    .unwrap();
    let class = ClassModel::create(&db, "Grade 8 History", "8", "history", 1000, false)
        .await
        .unwrap();

    let (token, _) = generate_jwt(outsider.id, false);
    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/payments/student/{}/2025", class.id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
