//! Authentication handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{AccountView, ProfileFields};
use crate::errors::AppResult;
use crate::services::Registration;
use crate::types::MessageResponse;

/// Account registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50, message = "Surname must be 1-50 characters"))]
    #[schema(example = "Liddell")]
    pub surname: String,
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    #[schema(example = "Alice")]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "Middle name must be 1-50 characters"))]
    pub middle_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[validate(length(min = 3, message = "Password must be at least 3 characters"))]
    #[schema(example = "wonderland", min_length = 3)]
    pub password: String,
    #[schema(example = "wonderland")]
    pub password_confirm: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(example = "admin123")]
    pub password: String,
}

/// Login response. The same token is also set as the session cookie.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Successfully logged in")]
    pub message: String,
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    /// Seconds until expiry
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Create public authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/registration", post(register))
        .route("/login", post(login))
}

/// Routes that need an existing session
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/registration",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account registered", body = AccountView),
        (status = 400, description = "Validation error or password mismatch"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AccountView>)> {
    let account = state
        .auth_service
        .register(Registration {
            email: payload.email,
            password: payload.password,
            password_confirm: payload.password_confirm,
            profile: ProfileFields {
                surname: payload.surname,
                name: payload.name,
                middle_name: payload.middle_name,
            },
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountView::from(account))))
}

/// Log in and receive the session cookie
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "Account was deleted")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let token = state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;

    let jar = state.session.set(jar, &token);
    let body = LoginResponse {
        message: "Successfully logged in".to_string(),
        expires_in: token.ttl.num_seconds(),
        token_type: "bearer".to_string(),
        access_token: token.value,
    };

    Ok((jar, Json(body)))
}

/// Clear the session cookie. The token itself stays valid until it expires.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        state.session.clear(jar),
        Json(MessageResponse::new("Successfully logged out")),
    )
}
