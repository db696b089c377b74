use axum::http::StatusCode;
use tower::ServiceExt;

use api::auth::generate_jwt;
use db::models::user::Model as UserModel;

use crate::helpers::app::{authed_request, make_test_app, response_json, unauthed_request};

#[tokio::test]
async fn registration_needs_staff_approval_before_login() {
    let (app, db) = make_test_app().await;

    let staff = UserModel::create(&db, "auth_staff", "auth_staff@test.com", "password", true, true)
        .await
        .unwrap();

    let registered = app
        .clone()
        .oneshot(unauthed_request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "new_student",
                "email": "new_student@test.com",
                "password": "password123",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(registered.status(), StatusCode::CREATED);
    let registered_json = response_json(registered).await;
    assert_eq!(registered_json["data"]["approved"], false);
    let user_id = registered_json["data"]["id"].as_i64().unwrap();

    let login_body = serde_json::json!({
        "username": "new_student",
        "password": "password123",
    });

    let early_login = app
        .clone()
        .oneshot(unauthed_request(
            "POST",
            "/api/auth/login",
            Some(login_body.clone()),
        ))
        .await
        .unwrap();
    assert_eq!(early_login.status(), StatusCode::FORBIDDEN);

    // Staff approve through the users endpoint.
    let (staff_token, _) = generate_jwt(staff.id, true);
    let approved = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            &format!("/api/users/{user_id}"),
            &staff_token,
            Some(serde_json::json!({ "approved": true })),
        ))
        .await
        .unwrap();
    assert_eq!(approved.status(), StatusCode::OK);

    let login = app
        .clone()
        .oneshot(unauthed_request("POST", "/api/auth/login", Some(login_body)))
        .await
        .unwrap();
    assert_eq!(login.status(), StatusCode::OK);
    let login_json = response_json(login).await;
    let token = login_json["data"]["token"].as_str().unwrap().to_string();

    let me = app
        .clone()
        .oneshot(authed_request("GET", "/api/auth/me", &token, None))
        .await
        .unwrap();
    assert_eq!(me.status(), StatusCode::OK);
    let me_json = response_json(me).await;
    assert_eq!(me_json["data"]["username"], "new_student");
}

#[tokio::test]
async fn wrong_credentials_are_unauthorized() {
    let (app, db) = make_test_app().await;

    UserModel::create(&db, "cred_user", "cred_user@test.com", "password", false, true)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(unauthed_request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "username": "cred_user",
                "password": "not-the-password",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_rejects_duplicates_and_bad_input() {
    let (app, db) = make_test_app().await;

    UserModel::create(&db, "dup_user", "dup_user@test.com", "password", false, true)
        .await
        .unwrap();

    let duplicate = app
        .clone()
        .oneshot(unauthed_request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "dup_user",
                "email": "other@test.com",
                "password": "password123",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let invalid = app
        .clone()
        .oneshot(unauthed_request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "ok_name",
                "email": "not-an-email",
                "password": "short",
            })),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    let json = response_json(invalid).await;
    assert!(json["message"].as_str().unwrap().contains("Invalid email"));
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let (app, _db) = make_test_app().await;

    let response = app
        .clone()
        .oneshot(unauthed_request("GET", "/api/classes", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
