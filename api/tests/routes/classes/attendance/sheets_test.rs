use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use api::auth::generate_jwt;
use db::models::{
    class::Model as ClassModel, class_enrollment::Model as EnrollmentModel,
    user::Model as UserModel,
};

use crate::helpers::app::{authed_request, make_test_app, response_json};

struct TestCtx {
    staff: UserModel,
    monitor: UserModel,
    student: UserModel,
    class: ClassModel,
}

async fn setup(db: &DatabaseConnection) -> TestCtx {
    let staff = UserModel::create(db, "att_staff", "att_staff@test.com", "password", true, true)
        .await
        .unwrap();
    let monitor = UserModel::create(
        db,
        "att_monitor",
        "att_monitor@test.com",
        "password",
        false,
        true,
    )
    .await
    .unwrap();
    let student = UserModel::create(
        db,
        "att_student",
        "att_student@test.com",
        "password",
        false,
        true,
    )
    .await
    .unwrap();

    let class = ClassModel::create(db, "Grade 10 Maths", "10", "maths", 2000, false)
        .await
        .unwrap();
    EnrollmentModel::enroll(db, class.id, monitor.id, true, false)
        .await
        .unwrap();
    EnrollmentModel::enroll(db, class.id, student.id, false, false)
        .await
        .unwrap();

    TestCtx {
        staff,
        monitor,
        student,
        class,
    }
}

fn sheet_body(day: u32) -> serde_json::Value {
    let date = Utc.with_ymd_and_hms(2025, 6, day, 9, 0, 0).unwrap();
    serde_json::json!({ "session_date": date.to_rfc3339() })
}

#[tokio::test]
async fn staff_and_monitor_can_open_sheets_but_students_cannot() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;

    let (staff_token, _) = generate_jwt(ctx.staff.id, true);
    let created = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/classes/{}/attendance/sheets", ctx.class.id),
            &staff_token,
            Some(sheet_body(2)),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    // Same calendar day again → conflict.
    let duplicate = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/classes/{}/attendance/sheets", ctx.class.id),
            &staff_token,
            Some(sheet_body(2)),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let (monitor_token, _) = generate_jwt(ctx.monitor.id, false);
    let by_monitor = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/classes/{}/attendance/sheets", ctx.class.id),
            &monitor_token,
            Some(sheet_body(9)),
        ))
        .await
        .unwrap();
    assert_eq!(by_monitor.status(), StatusCode::CREATED);

    let (student_token, _) = generate_jwt(ctx.student.id, false);
    let by_student = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/classes/{}/attendance/sheets", ctx.class.id),
            &student_token,
            Some(sheet_body(16)),
        ))
        .await
        .unwrap();
    assert_eq!(by_student.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn entries_accept_only_enrolled_students_until_finalized() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.staff.id, true);

    let created = app
        .clone()
        .oneshot(authed_request(
            "POST",
            &format!("/api/classes/{}/attendance/sheets", ctx.class.id),
            &token,
            Some(sheet_body(2)),
        ))
        .await
        .unwrap();
    let sheet_id = response_json(created).await["data"]["id"].as_i64().unwrap();

    // Unknown student id on the sheet.
    let invalid = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!(
                "/api/classes/{}/attendance/sheets/{}/entries",
                ctx.class.id, sheet_id
            ),
            &token,
            Some(serde_json::json!({
                "entries": [{ "student_id": ctx.student.id + 999, "status": "present" }]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let marked = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!(
                "/api/classes/{}/attendance/sheets/{}/entries",
                ctx.class.id, sheet_id
            ),
            &token,
            Some(serde_json::json!({
                "entries": [
                    { "student_id": ctx.student.id, "status": "present" },
                    { "student_id": ctx.monitor.id, "status": "absent" }
                ]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(marked.status(), StatusCode::OK);

    // Re-marking flips an existing entry.
    let remarked = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!(
                "/api/classes/{}/attendance/sheets/{}/entries",
                ctx.class.id, sheet_id
            ),
            &token,
            Some(serde_json::json!({
                "entries": [{ "student_id": ctx.monitor.id, "status": "present" }]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(remarked.status(), StatusCode::OK);

    let finalized = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!(
                "/api/classes/{}/attendance/sheets/{}/finalize",
                ctx.class.id, sheet_id
            ),
            &token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(finalized.status(), StatusCode::OK);

    let locked = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!(
                "/api/classes/{}/attendance/sheets/{}/entries",
                ctx.class.id, sheet_id
            ),
            &token,
            Some(serde_json::json!({
                "entries": [{ "student_id": ctx.student.id, "status": "absent" }]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(locked.status(), StatusCode::CONFLICT);

    // The sheet detail shows both entries with usernames resolved.
    let detail = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!(
                "/api/classes/{}/attendance/sheets/{}",
                ctx.class.id, sheet_id
            ),
            &token,
            None,
        ))
        .await
        .unwrap();
    let json = response_json(detail).await;
    let entries = json["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e["username"].is_string()));
}

#[tokio::test]
async fn month_filter_limits_sheet_listing() {
    let (app, db) = make_test_app().await;
    let ctx = setup(&db).await;
    let (token, _) = generate_jwt(ctx.staff.id, true);

    for day in [2u32, 9, 16] {
        let created = app
            .clone()
            .oneshot(authed_request(
                "POST",
                &format!("/api/classes/{}/attendance/sheets", ctx.class.id),
                &token,
                Some(sheet_body(day)),
            ))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
    }

    let june = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!(
                "/api/classes/{}/attendance/sheets?year=2025&month=6",
                ctx.class.id
            ),
            &token,
            None,
        ))
        .await
        .unwrap();
    let june_json = response_json(june).await;
    assert_eq!(june_json["data"]["total"], 3);

    let july = app
        .clone()
        .oneshot(authed_request(
            "GET",
            &format!(
                "/api/classes/{}/attendance/sheets?year=2025&month=7",
                ctx.class.id
            ),
            &token,
            None,
        ))
        .await
        .unwrap();
    let july_json = response_json(july).await;
    assert_eq!(july_json["data"]["total"], 0);
}
