use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use tower::ServiceExt;

use api::auth::generate_jwt;
use db::models::{
    attendance_entry::{self, AttendanceStatus},
    attendance_sheet::Model as SheetModel,
    class::Model as ClassModel,
    class_enrollment::Model as EnrollmentModel,
    payment::Entity as PaymentEntity,
    user::Model as UserModel,
};

use crate::helpers::app::{authed_request, make_test_app, response_json};

struct TestCtx {
    _staff: UserModel,
    student: UserModel,
    outsider: UserModel,
    class: ClassModel,
}

async fn setup(db: &DatabaseConnection) -> TestCtx {
    let staff = UserModel::create(db, "pay_staff", "pay_staff@test.com", "password", true, true)
        .await
        .unwrap();
    let student = UserModel::create(
        db,
        "pay_student",
        "pay_student@test.com",
        "password",
        false,
        true,
    )
    .await
    .unwrap();
    let outsider = UserModel::create(
        db,
        "pay_outsider",
        "pay_outsider@test.com",
        "password",
        false,
        true,
    )
    .await
    .unwrap();

    let class = ClassModel::create(db, "Grade 10 Maths", "10", "maths", 2000, false)
        .await
        .unwrap();
    EnrollmentModel::enroll(db, class.id, student.id, false, false)
        .await
        .unwrap();

    // Three March sessions, two attended.
    let dates = [
        Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
        Utc.with_ymd_and_hms(2025, 3, 17, 9, 0, 0).unwrap(),
    ];
    for (i, date) in dates.iter().enumerate() {
        let sheet = SheetModel::create(db, class.id, staff.id, *date).await.unwrap();
        let status = if i < 2 {
            AttendanceStatus::Present
        } else {
            AttendanceStatus::Absent
        };
        attendance_entry::ActiveModel {
            sheet_id: Set(sheet.id),
            student_id: Set(student.id),
            status: Set(status),
        }
        .insert(db)
        .await
        .unwrap();
    }

    TestCtx {
        _staff: staff,
        student,
        outsider,
        class,
    }
}

fn submit_body(class_id: i64) -> serde_json::Value {
    serde_json::json!({
        "class_id": class_id,
        "year": 2025,
        "month": 3,
        "amount": 2000,
        "receipt_reference": "rcpt-0301",
    })
}

#[tokio::test]
async fn submit_captures_attendance_snapshot() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.student.id, false);

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/payments/submit",
            &token,
            Some(submit_body(ctx.class.id)),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = response_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "pending");
    assert_eq!(json["data"]["attendance"]["present_days"], 2);
    assert_eq!(json["data"]["attendance"]["total_class_days"], 3);
    assert_eq!(json["data"]["student"]["username"], "pay_student");
    assert_eq!(json["data"]["class"]["name"], "Grade 10 Maths");
}

#[tokio::test]
async fn second_submit_for_same_month_is_rejected() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.student.id, false);

    let first = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/payments/submit",
            &token,
            Some(submit_body(ctx.class.id)),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/payments/submit",
            &token,
            Some(submit_body(ctx.class.id)),
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);

    let json = response_json(second).await;
    assert_eq!(json["success"], false);

    // No second row was created.
    let count = PaymentEntity::find().count(&db).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn submit_requires_enrollment_and_known_class() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;

    let (outsider_token, _) = generate_jwt(ctx.outsider.id, false);
    let forbidden = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/payments/submit",
            &outsider_token,
            Some(submit_body(ctx.class.id)),
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let (student_token, _) = generate_jwt(ctx.student.id, false);
    let not_found = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/payments/submit",
            &student_token,
            Some(submit_body(ctx.class.id + 999)),
        ))
        .await
        .unwrap();
    assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn submit_validates_month_range() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.student.id, false);

    let mut body = submit_body(ctx.class.id);
    body["month"] = serde_json::json!(13);

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/payments/submit",
            &token,
            Some(body),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = response_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("Month must be between 1 and 12"));
}

#[tokio::test]
async fn pending_payment_is_editable_by_owner_only() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.student.id, false);

    let created = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/payments/submit",
            &token,
            Some(submit_body(ctx.class.id)),
        ))
        .await
        .unwrap();
    let created_json = response_json(created).await;
    let payment_id = created_json["data"]["id"].as_i64().unwrap();

    let edit_body = serde_json::json!({ "receipt_reference": "rcpt-0301-v2" });

    let (outsider_token, _) = generate_jwt(ctx.outsider.id, false);
    let forbidden = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/payments/{payment_id}"),
            &outsider_token,
            Some(edit_body.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let updated = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/payments/{payment_id}"),
            &token,
            Some(edit_body),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::OK);
    let json = response_json(updated).await;
    assert_eq!(json["data"]["receipt_reference"], "rcpt-0301-v2");
    assert_eq!(json["data"]["status"], "pending");
}
