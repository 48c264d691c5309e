//! Admin-tier handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use super::manager_handler::AccountUpdateResponse;
use crate::api::middleware::CurrentAccount;
use crate::api::AppState;
use crate::config::DETAIL_UPDATED;
use crate::domain::{AccountId, Role};
use crate::errors::AppResult;
use crate::types::GreetingResponse;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoleQuery {
    /// `user` or `manager`
    pub role: String,
}

/// Create admin-tier routes
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/user/put/:id", put(set_role))
        .route("/admin-check", get(admin_check))
}

/// Assign a non-admin role
#[utoipa::path(
    put,
    path = "/user/put/{id}",
    tag = "Admins only",
    params(("id" = i32, Path, description = "Account id"), RoleQuery),
    responses(
        (status = 200, description = "Role changed", body = AccountUpdateResponse),
        (status = 400, description = "Unknown role"),
        (status = 403, description = "Admin role requested or target is an admin"),
        (status = 404, description = "Account not found")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn set_role(
    State(state): State<AppState>,
    Extension(CurrentAccount(caller)): Extension<CurrentAccount>,
    Path(id): Path<AccountId>,
    Query(query): Query<RoleQuery>,
) -> AppResult<Json<AccountUpdateResponse>> {
    let role: Role = query.role.parse()?;
    let target = state.account_service.get_account(id).await?;
    state.policy.authorize_role_change(&caller, &target, role)?;

    let updated = state.account_service.change_role(id, role).await?;

    Ok(Json(AccountUpdateResponse {
        message: DETAIL_UPDATED.to_string(),
        user: updated.into(),
    }))
}

/// Greets admins
#[utoipa::path(
    get,
    path = "/admin-check",
    tag = "Check Roles",
    responses(
        (status = 200, description = "Caller is an admin", body = GreetingResponse),
        (status = 403, description = "Admin access required")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn admin_check(Extension(CurrentAccount(caller)): Extension<CurrentAccount>) -> Json<GreetingResponse> {
    Json(GreetingResponse::from(&caller))
}
