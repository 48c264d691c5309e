//! Self-service handlers. The caller is always the subject.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::{delete, get, put},
    Extension, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentAccount;
use crate::api::AppState;
use crate::domain::{AccountChanges, AccountView};
use crate::errors::AppResult;
use crate::services::ProfileUpdateResponse;
use crate::types::MessageResponse;

/// Profile update request; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ProfileUpdateRequest {
    #[validate(length(min = 1, max = 50))]
    pub surname: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub middle_name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
}

impl From<ProfileUpdateRequest> for AccountChanges {
    fn from(req: ProfileUpdateRequest) -> Self {
        Self {
            email: req.email,
            surname: req.surname,
            name: req.name,
            middle_name: req.middle_name,
            role: None,
        }
    }
}

/// Current password, required only when changing the email
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PasswordQuery {
    pub password: Option<String>,
}

/// Create self-service routes
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/user/profile", get(get_profile))
        .route("/user/profile/update", put(update_profile))
        .route("/user/delete", delete(delete_self))
}

/// Get the caller's own account
#[utoipa::path(
    get,
    path = "/user/profile",
    tag = "General",
    responses(
        (status = 200, description = "Current account", body = AccountView),
        (status = 401, description = "Not authenticated")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn get_profile(Extension(CurrentAccount(caller)): Extension<CurrentAccount>) -> Json<AccountView> {
    Json(AccountView::from(caller))
}

/// Update the caller's own profile
#[utoipa::path(
    put,
    path = "/user/profile/update",
    tag = "General",
    params(PasswordQuery),
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Update outcome with per-field details", body = ProfileUpdateResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not authenticated")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(CurrentAccount(caller)): Extension<CurrentAccount>,
    Query(query): Query<PasswordQuery>,
    ValidatedJson(payload): ValidatedJson<ProfileUpdateRequest>,
) -> AppResult<Json<ProfileUpdateResponse>> {
    let update = state
        .account_service
        .update_profile(&caller, payload.into(), query.password)
        .await?;

    Ok(Json(update.into()))
}

/// Soft-delete the caller's own account and end the session
#[utoipa::path(
    delete,
    path = "/user/delete",
    tag = "General",
    responses(
        (status = 200, description = "Account deleted", body = MessageResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn delete_self(
    State(state): State<AppState>,
    Extension(CurrentAccount(caller)): Extension<CurrentAccount>,
    jar: CookieJar,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    state.account_service.soft_delete(caller.id).await?;

    Ok((
        state.session.clear(jar),
        Json(MessageResponse::new("successfully deleted")),
    ))
}
