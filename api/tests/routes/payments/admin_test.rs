use axum::http::StatusCode;
use sea_orm::{DatabaseConnection, EntityTrait};
use tower::ServiceExt;

use api::auth::generate_jwt;
use db::models::{
    attendance_sheet::MonthAttendance,
    class::Model as ClassModel,
    class_enrollment::Model as EnrollmentModel,
    payment::{Entity as PaymentEntity, Model as PaymentModel, PaymentStatus},
    user::Model as UserModel,
};

use crate::helpers::app::{authed_request, make_test_app, response_json};

struct TestCtx {
    staff: UserModel,
    student1: UserModel,
    _student2: UserModel,
    class: ClassModel,
    payment1: PaymentModel,
    payment2: PaymentModel,
}

async fn setup(db: &DatabaseConnection) -> TestCtx {
    let staff = UserModel::create(db, "adm_staff", "adm_staff@test.com", "password", true, true)
        .await
        .unwrap();
    let student1 = UserModel::create(
        db,
        "adm_student1",
        "adm_student1@test.com",
        "password",
        false,
        true,
    )
    .await
    .unwrap();
    let student2 = UserModel::create(
        db,
        "adm_student2",
        "adm_student2@test.com",
        "password",
        false,
        true,
    )
    .await
    .unwrap();

    let class = ClassModel::create(db, "Grade 10 Maths", "10", "maths", 2000, false)
        .await
        .unwrap();
    EnrollmentModel::enroll(db, class.id, student1.id, false, false)
        .await
        .unwrap();
    EnrollmentModel::enroll(db, class.id, student2.id, true, false)
        .await
        .unwrap();

    let snapshot = MonthAttendance {
        present_days: 3,
        total_class_days: 4,
    };
    let payment1 = PaymentModel::submit(
        db, student1.id, class.id, 2025, 3, 2000, "rcpt-s1", None, snapshot,
    )
    .await
    .unwrap();
    let payment2 = PaymentModel::submit(
        db, student2.id, class.id, 2025, 3, 2000, "rcpt-s2", None, snapshot,
    )
    .await
    .unwrap();

    TestCtx {
        staff,
        student1,
        _student2: student2,
        class,
        payment1,
        payment2,
    }
}

#[tokio::test]
async fn process_approves_and_stamps_admin_action() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.staff.id, true);

    // Capitalized spelling must be accepted.
    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/payments/admin/{}/process", ctx.payment1.id),
            &token,
            Some(serde_json::json!({ "action": "Approved", "note": "receipt checked" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["admin_action"]["action_by"], ctx.staff.id);
    assert_eq!(
        json["data"]["admin_action"]["action_by_username"],
        "adm_staff"
    );
    assert!(json["data"]["admin_action"]["action_date"].is_string());
    assert_eq!(json["data"]["admin_action"]["note"], "receipt checked");
    // Populated display fields.
    assert_eq!(json["data"]["student"]["username"], "adm_student1");
    assert_eq!(json["data"]["class"]["name"], "Grade 10 Maths");
}

#[tokio::test]
async fn process_rejects_unknown_action() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.staff.id, true);

    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/payments/admin/{}/process", ctx.payment1.id),
            &token,
            Some(serde_json::json!({ "action": "maybe" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let pending = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/payments/admin/{}/process", ctx.payment1.id),
            &token,
            Some(serde_json::json!({ "action": "pending" })),
        ))
        .await
        .unwrap();
    assert_eq!(pending.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bulk_process_rejects_both_payments() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.staff.id, true);

    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            "/api/payments/admin/bulk-process",
            &token,
            Some(serde_json::json!({
                "payment_ids": [ctx.payment1.id, ctx.payment2.id],
                "action": "rejected",
                "note": "term closed",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["data"]["modified_count"], 2);

    for id in [ctx.payment1.id, ctx.payment2.id] {
        let row = PaymentEntity::find_by_id(id).one(&db).await.unwrap().unwrap();
        assert_eq!(row.status, PaymentStatus::Rejected);
        assert_eq!(row.action_by, Some(ctx.staff.id));
        assert_eq!(row.action_note.as_deref(), Some("term closed"));
    }
}

#[tokio::test]
async fn month_view_lists_roster_and_pending_requests() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.staff.id, true);

    let response = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!("/api/payments/admin/{}/2025/3", ctx.class.id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let students = json["data"]["students"].as_array().unwrap();
    assert_eq!(students.len(), 2);
    let pending = json["data"]["pending_requests"].as_array().unwrap();
    assert_eq!(pending.len(), 2);
    // Both enrolled students carry a populated payment for March.
    for student in students {
        assert_eq!(student["payment"]["status"], "pending");
        assert_eq!(student["payment"]["class"]["name"], "Grade 10 Maths");
    }
}

#[tokio::test]
async fn admin_endpoints_reject_students() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.student1.id, false);

    let process = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/payments/admin/{}/process", ctx.payment1.id),
            &token,
            Some(serde_json::json!({ "action": "approved" })),
        ))
        .await
        .unwrap();
    assert_eq!(process.status(), StatusCode::FORBIDDEN);

    let listing = app
        .clone()
        .oneshot(authed_request(
            "GET",
            "/api/admin/all-payment-requests",
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(listing.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn all_payment_requests_filters_by_status() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.staff.id, true);

    // Decide one of the two, then filter both ways.
    ctx.payment1
        .clone()
        .process(&db, PaymentStatus::Approved, ctx.staff.id, None)
        .await
        .unwrap();

    let pending = app
        .clone()
        .oneshot(authed_request(
            "GET",
            "/api/admin/all-payment-requests?status=pending",
            &token,
            None,
        ))
        .await
        .unwrap();
    let pending_json = response_json(pending).await;
    assert_eq!(pending_json["data"]["total"], 1);
    assert_eq!(
        pending_json["data"]["payment_requests"][0]["student"]["username"],
        "adm_student2"
    );

    // The legacy capitalized spelling works as a filter value too.
    let approved = app
        .clone()
        .oneshot(authed_request(
            "GET",
            "/api/admin/all-payment-requests?status=Approved",
            &token,
            None,
        ))
        .await
        .unwrap();
    let approved_json = response_json(approved).await;
    assert_eq!(approved_json["data"]["total"], 1);
}

#[tokio::test]
async fn status_endpoint_shares_the_state_machine() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.staff.id, true);

    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/admin/payment-requests/{}/status", ctx.payment2.id),
            &token,
            Some(serde_json::json!({ "status": "approved" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    assert_eq!(json["data"]["status"], "approved");

    let row = PaymentEntity::find_by_id(ctx.payment2.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, PaymentStatus::Approved);
}

#[tokio::test]
async fn delete_removes_payment_request() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.staff.id, true);

    let first = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/admin/payment-requests/{}", ctx.payment1.id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let row = PaymentEntity::find_by_id(ctx.payment1.id)
        .one(&db)
        .await
        .unwrap();
    assert!(row.is_none());

    let second = app
        .clone()
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/admin/payment-requests/{}", ctx.payment1.id),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}
