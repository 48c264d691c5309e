//! Integration tests for API endpoints.
//!
//! The router runs against the in-memory account store, seeded with the demo
//! accounts, so no database is needed.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE, WWW_AUTHENTICATE},
        HeaderName, Method, Request, StatusCode,
    },
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use account_service::api::{create_router, AppState};
use account_service::config::Config;
use account_service::infra::MemoryAccountStore;
use account_service::services::{seed_demo_accounts, Services};

// =============================================================================
// Test Helpers
// =============================================================================

async fn test_app() -> Router {
    let config = Config::with_secret("test-secret-key-for-testing-only-32chars");
    let services = Services::with_repository(Arc::new(MemoryAccountStore::new()), &config);
    seed_demo_accounts(services.repository().as_ref()).await.unwrap();

    create_router(AppState::from_services(&services, &config, None))
}

struct TestResponse {
    status: StatusCode,
    set_cookie: Option<String>,
    www_authenticate: Option<String>,
    body: Value,
}

async fn send(app: &Router, method: Method, uri: &str, cookie: Option<&str>, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let header = |name: HeaderName| {
        response
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    };
    let set_cookie = header(SET_COOKIE);
    let www_authenticate = header(WWW_AUTHENTICATE);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        set_cookie,
        www_authenticate,
        body,
    }
}

/// Log in and return the `access_token=...` pair for the Cookie header.
async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let set_cookie = response.set_cookie.expect("login sets the session cookie");
    set_cookie.split(';').next().unwrap().to_string()
}

async fn account_id(app: &Router, admin_cookie: &str, email: &str) -> i64 {
    let response = send(app, Method::GET, "/users/get", Some(admin_cookie), None).await;
    response
        .body
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["email"] == email)
        .and_then(|a| a["id"].as_i64())
        .expect("account is listed")
}

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn test_health_without_database() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["database"]["status"], "in-memory");
}

#[tokio::test]
async fn test_registration() {
    let app = test_app().await;
    let payload = json!({
        "surname": "Liddell",
        "name": "Alice",
        "email": "alice@x.com",
        "password": "wonderland",
        "password_confirm": "wonderland"
    });

    let created = send(&app, Method::POST, "/registration", None, Some(payload.clone())).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["email"], "alice@x.com");
    assert_eq!(created.body["role"], "user");
    assert!(created.body.get("password_hash").is_none());

    let duplicate = send(&app, Method::POST, "/registration", None, Some(payload)).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_registration_password_mismatch() {
    let app = test_app().await;
    let payload = json!({
        "surname": "Liddell",
        "name": "Alice",
        "email": "alice@x.com",
        "password": "wonderland",
        "password_confirm": "looking-glass"
    });

    let response = send(&app, Method::POST, "/registration", None, Some(payload)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["message"], "Passwords do not match");
}

#[tokio::test]
async fn test_login_sets_http_only_cookie() {
    let app = test_app().await;
    let response = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "admin@example.com", "password": "admin123" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.set_cookie.unwrap();
    assert!(cookie.starts_with("access_token="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Max-Age=86400"));
    assert_eq!(response.body["token_type"], "bearer");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = test_app().await;
    let response = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "admin@example.com", "password": "nope" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.set_cookie.is_none());
}

// =============================================================================
// Self-service
// =============================================================================

#[tokio::test]
async fn test_profile_requires_session() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/user/profile", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.www_authenticate.as_deref(), Some("Bearer"));
}

#[tokio::test]
async fn test_profile_with_cookie_and_bearer() {
    let app = test_app().await;
    let cookie = login(&app, "user@example.com", "user123").await;

    let by_cookie = send(&app, Method::GET, "/user/profile", Some(&cookie), None).await;
    assert_eq!(by_cookie.status, StatusCode::OK);
    assert_eq!(by_cookie.body["email"], "user@example.com");

    let token = cookie.trim_start_matches("access_token=");
    let request = Request::builder()
        .uri("/user/profile")
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let by_bearer = app.clone().oneshot(request).await.unwrap();
    assert_eq!(by_bearer.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_profile_email_change_needs_password() {
    let app = test_app().await;
    let cookie = login(&app, "user@example.com", "user123").await;

    let without = send(
        &app,
        Method::PUT,
        "/user/profile/update",
        Some(&cookie),
        Some(json!({ "email": "new@example.com", "name": "Renamed" })),
    )
    .await;
    assert_eq!(without.status, StatusCode::OK);
    assert_eq!(without.body["user"]["email"], "user@example.com");
    assert_eq!(without.body["user"]["name"], "Renamed");
    assert_eq!(without.body["details"], json!(["Enter your password", "successfully updated"]));

    let with = send(
        &app,
        Method::PUT,
        "/user/profile/update?password=user123",
        Some(&cookie),
        Some(json!({ "email": "new@example.com" })),
    )
    .await;
    assert_eq!(with.body["user"]["email"], "new@example.com");
    assert_eq!(with.body["details"], json!(["successfully updated"]));
}

#[tokio::test]
async fn test_profile_update_rejects_empty_middle_name() {
    let app = test_app().await;
    let cookie = login(&app, "user@example.com", "user123").await;

    let response = send(
        &app,
        Method::PUT,
        "/user/profile/update",
        Some(&cookie),
        Some(json!({ "middle_name": "" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        response.body["error"]["message"],
        "middle_name must be between 1 and 50 characters"
    );
}

#[tokio::test]
async fn test_registration_with_missing_fields_is_unprocessable() {
    let app = test_app().await;

    let response = send(
        &app,
        Method::POST,
        "/registration",
        None,
        Some(json!({ "email": "alice@x.com" })),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"]["code"], "INVALID_BODY");
}

#[tokio::test]
async fn test_delete_self_clears_cookie_and_blocks_login() {
    let app = test_app().await;
    let cookie = login(&app, "user@example.com", "user123").await;

    let deleted = send(&app, Method::DELETE, "/user/delete", Some(&cookie), None).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(deleted.set_cookie.unwrap().contains("Max-Age=0"));

    // The old token no longer resolves
    let profile = send(&app, Method::GET, "/user/profile", Some(&cookie), None).await;
    assert_eq!(profile.status, StatusCode::UNAUTHORIZED);

    let relogin = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "email": "user@example.com", "password": "user123" })),
    )
    .await;
    assert_eq!(relogin.status, StatusCode::NOT_FOUND);
    assert_eq!(relogin.body["error"]["message"], "This user was deleted");
}

#[tokio::test]
async fn test_logout_keeps_token_valid() {
    let app = test_app().await;
    let cookie = login(&app, "user@example.com", "user123").await;

    let logout = send(&app, Method::POST, "/logout", Some(&cookie), None).await;
    assert_eq!(logout.status, StatusCode::OK);
    assert!(logout.set_cookie.unwrap().contains("Max-Age=0"));

    let profile = send(&app, Method::GET, "/user/profile", Some(&cookie), None).await;
    assert_eq!(profile.status, StatusCode::OK);
}

// =============================================================================
// Manager & Admin tiers
// =============================================================================

#[tokio::test]
async fn test_user_cannot_list_accounts() {
    let app = test_app().await;
    let cookie = login(&app, "user@example.com", "user123").await;

    let response = send(&app, Method::GET, "/users/get", Some(&cookie), None).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"]["message"], "Access denied");
}

#[tokio::test]
async fn test_manager_lists_and_checks() {
    let app = test_app().await;
    let cookie = login(&app, "manager@example.com", "manager123").await;

    let listed = send(&app, Method::GET, "/users/get", Some(&cookie), None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body.as_array().unwrap().len(), 3);

    let check = send(&app, Method::GET, "/manager-check", Some(&cookie), None).await;
    assert_eq!(check.body["MSG"], "Hello, Manager! Your current role is manager");

    let admin_check = send(&app, Method::GET, "/admin-check", Some(&cookie), None).await;
    assert_eq!(admin_check.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_manager_deletes_user_but_not_admin() {
    let app = test_app().await;
    let admin_cookie = login(&app, "admin@example.com", "admin123").await;
    let manager_cookie = login(&app, "manager@example.com", "manager123").await;
    let user_id = account_id(&app, &admin_cookie, "user@example.com").await;
    let admin_id = account_id(&app, &admin_cookie, "admin@example.com").await;

    let on_admin = send(
        &app,
        Method::DELETE,
        &format!("/user/delete/{}", admin_id),
        Some(&manager_cookie),
        None,
    )
    .await;
    assert_eq!(on_admin.status, StatusCode::FORBIDDEN);

    let on_user = send(
        &app,
        Method::DELETE,
        &format!("/user/delete/{}", user_id),
        Some(&manager_cookie),
        None,
    )
    .await;
    assert_eq!(on_user.status, StatusCode::OK);

    let fetched = send(&app, Method::GET, &format!("/user/get/{}", user_id), Some(&admin_cookie), None).await;
    assert_eq!(fetched.body["is_active"], false);
}

#[tokio::test]
async fn test_manager_cannot_edit_admin_fields() {
    let app = test_app().await;
    let admin_cookie = login(&app, "admin@example.com", "admin123").await;
    let manager_cookie = login(&app, "manager@example.com", "manager123").await;
    let admin_id = account_id(&app, &admin_cookie, "admin@example.com").await;
    let user_id = account_id(&app, &admin_cookie, "user@example.com").await;

    let on_admin = send(
        &app,
        Method::PUT,
        &format!("/user/update/{}", admin_id),
        Some(&manager_cookie),
        Some(json!({ "name": "Hacked" })),
    )
    .await;
    assert_eq!(on_admin.status, StatusCode::FORBIDDEN);

    let on_user = send(
        &app,
        Method::PUT,
        &format!("/user/update/{}", user_id),
        Some(&manager_cookie),
        Some(json!({ "name": "Edited" })),
    )
    .await;
    assert_eq!(on_user.status, StatusCode::OK);
    assert_eq!(on_user.body["user"]["name"], "Edited");
}

#[tokio::test]
async fn test_admin_role_assignment() {
    let app = test_app().await;
    let admin_cookie = login(&app, "admin@example.com", "admin123").await;
    let user_id = account_id(&app, &admin_cookie, "user@example.com").await;

    let to_admin = send(
        &app,
        Method::PUT,
        &format!("/user/put/{}?role=admin", user_id),
        Some(&admin_cookie),
        None,
    )
    .await;
    assert_eq!(to_admin.status, StatusCode::FORBIDDEN);

    let to_manager = send(
        &app,
        Method::PUT,
        &format!("/user/put/{}?role=manager", user_id),
        Some(&admin_cookie),
        None,
    )
    .await;
    assert_eq!(to_manager.status, StatusCode::OK);
    assert_eq!(to_manager.body["user"]["role"], "manager");

    let unknown = send(
        &app,
        Method::PUT,
        &format!("/user/put/{}?role=overlord", user_id),
        Some(&admin_cookie),
        None,
    )
    .await;
    assert_eq!(unknown.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_manager_cannot_assign_roles() {
    let app = test_app().await;
    let admin_cookie = login(&app, "admin@example.com", "admin123").await;
    let manager_cookie = login(&app, "manager@example.com", "manager123").await;
    let user_id = account_id(&app, &admin_cookie, "user@example.com").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/user/put/{}?role=manager", user_id),
        Some(&manager_cookie),
        None,
    )
    .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_account_is_not_found() {
    let app = test_app().await;
    let cookie = login(&app, "admin@example.com", "admin123").await;

    let response = send(&app, Method::GET, "/user/get/999", Some(&cookie), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
