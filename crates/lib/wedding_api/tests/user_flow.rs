//! Account lifecycle through the router: register, login, profile, update,
//! delete.

mod common;

use std::time::Instant;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use common::{PASSWORD, TestApp};
use serde_json::json;
use wedding_api::services::auth::FAILED_LOGIN_DELAY;
use wedding_core::auth::queries::UserRepository;

#[tokio::test]
async fn register_returns_user_and_token() {
    let app = TestApp::new();
    let (status, json) = app
        .call(
            Method::POST,
            "/api/v1/user/register",
            None,
            Some(json!({
                "name": "  Ana  ",
                "email": "ana@example.com",
                "password": PASSWORD,
                "partner_name": "Bruno",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "user registered successfully");
    assert_eq!(json["user"]["name"], "Ana");
    assert_eq!(json["expires_in"], 86400);
    assert!(json["user"].get("password_hash").is_none());

    let token = json["token"].as_str().unwrap();
    let claims = app.tokens.verify(token).unwrap();
    assert_eq!(claims.user_id, json["user"]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = TestApp::new();
    app.register("ana@example.com").await;

    let (status, json) = app
        .call(
            Method::POST,
            "/api/v1/user/register",
            None,
            Some(json!({
                "name": "Other",
                "email": "ana@example.com",
                "password": PASSWORD,
                "partner_name": "Someone",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json["error"],
        "unable to register user, please check your data"
    );
}

#[tokio::test]
async fn weak_password_is_a_bad_request() {
    let app = TestApp::new();
    let (status, json) = app
        .call(
            Method::POST,
            "/api/v1/user/register",
            None,
            Some(json!({
                "name": "Ana",
                "email": "ana@example.com",
                "password": "password1!",
                "partner_name": "Bruno",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "password must contain at least one uppercase letter"
    );
}

#[tokio::test]
async fn malformed_json_is_unprocessable() {
    let app = TestApp::new();
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/user/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, json) = app.send(req).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"], "invalid request data");
}

#[tokio::test]
async fn login_issues_a_working_token() {
    let app = TestApp::new();
    let (_, id) = app.register("ana@example.com").await;

    let (status, json) = app
        .call(
            Method::POST,
            "/api/v1/user/login",
            None,
            Some(json!({"email": "ana@example.com", "password": PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["expires_in"], 86400);
    assert_eq!(json["user"]["id"], id);

    let token = json["token"].as_str().unwrap();
    let (status, profile) = app
        .call(Method::GET, "/api/v1/user/profile", Some(token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], "ana@example.com");
    assert_eq!(profile["partner_name"], "Bruno");
}

#[tokio::test]
async fn failed_logins_look_identical_and_are_delayed() {
    let app = TestApp::new();
    app.register("ana@example.com").await;

    for body in [
        json!({"email": "ana@example.com", "password": "Wrong1!pass"}),
        json!({"email": "nobody@example.com", "password": PASSWORD}),
    ] {
        let started = Instant::now();
        let (status, json) = app
            .call(Method::POST, "/api/v1/user/login", None, Some(body))
            .await;
        assert!(started.elapsed() >= FAILED_LOGIN_DELAY);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json, json!({"error": "invalid email or password"}));
    }
}

#[tokio::test]
async fn profile_update_is_partial() {
    let app = TestApp::new();
    let (token, _) = app.register("ana@example.com").await;

    let (status, json) = app
        .call(
            Method::PATCH,
            "/api/v1/user/update",
            Some(&token),
            Some(json!({"partner_name": "  Carla "})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "profile updated successfully");
    assert_eq!(json["user"]["partner_name"], "Carla");
    assert_eq!(json["user"]["name"], "Ana");

    let (status, json) = app
        .call(
            Method::PATCH,
            "/api/v1/user/update",
            Some(&token),
            Some(json!({"name": "A"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid request data");
}

#[tokio::test]
async fn deleted_account_disappears() {
    let app = TestApp::new();
    let (token, _) = app.register("ana@example.com").await;

    let (status, json) = app
        .call(Method::DELETE, "/api/v1/user/delete", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "user account deleted successfully");

    // The token itself stays valid until expiry; the account does not.
    let (status, json) = app
        .call(Method::GET, "/api/v1/user/profile", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "user not found");

    let (status, _) = app
        .call(
            Method::POST,
            "/api/v1/user/login",
            None,
            Some(json!({"email": "ana@example.com", "password": PASSWORD})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_acknowledges() {
    let app = TestApp::new();
    let (token, _) = app.register("ana@example.com").await;

    let (status, json) = app
        .call(Method::POST, "/api/v1/user/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "logged out successfully");
}

#[tokio::test]
async fn overlong_name_is_a_bad_request() {
    let app = TestApp::new();
    let (status, json) = app
        .call(
            Method::POST,
            "/api/v1/user/register",
            None,
            Some(json!({
                "name": "N".repeat(150),
                "email": "ana@example.com",
                "password": PASSWORD,
                "partner_name": "Bruno",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "name must be between 2 and 100 characters");
    assert!(app.users.find_by_email("ana@example.com").await.unwrap().is_none());
}
