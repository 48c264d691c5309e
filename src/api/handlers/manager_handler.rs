//! Manager-tier handlers: listing, reading, editing and deleting other
//! accounts.
//!
//! The tier gate runs as middleware; per-target rules are checked here.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, put},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentAccount;
use crate::api::AppState;
use crate::config::{DETAIL_NOTHING_TO_CHANGE, DETAIL_UPDATED};
use crate::domain::{AccountChanges, AccountId, AccountManagerView};
use crate::errors::AppResult;
use crate::types::{GreetingResponse, MessageResponse};

/// Name fields a manager may edit; omitted fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateAccountRequest {
    #[validate(length(min = 1, max = 50))]
    pub surname: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub middle_name: Option<String>,
}

impl From<UpdateAccountRequest> for AccountChanges {
    fn from(req: UpdateAccountRequest) -> Self {
        Self {
            surname: req.surname,
            name: req.name,
            middle_name: req.middle_name,
            ..Self::default()
        }
    }
}

/// Outcome of an administrative update
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountUpdateResponse {
    #[schema(example = "successfully updated")]
    pub message: String,
    pub user: AccountManagerView,
}

/// Create manager-tier routes
pub fn manager_routes() -> Router<AppState> {
    Router::new()
        .route("/users/get", get(list_accounts))
        .route("/user/get/:id", get(get_account))
        .route("/user/update/:id", put(update_account))
        .route("/user/delete/:id", delete(delete_account))
        .route("/manager-check", get(manager_check))
}

/// List active accounts
#[utoipa::path(
    get,
    path = "/users/get",
    tag = "Managers only",
    responses(
        (status = 200, description = "Active accounts", body = Vec<AccountManagerView>),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Manager access required")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn list_accounts(State(state): State<AppState>) -> AppResult<Json<Vec<AccountManagerView>>> {
    let accounts = state.account_service.list_active().await?;
    Ok(Json(accounts.into_iter().map(AccountManagerView::from).collect()))
}

/// Get any account by id, including soft-deleted ones
#[utoipa::path(
    get,
    path = "/user/get/{id}",
    tag = "Managers only",
    params(("id" = i32, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account", body = AccountManagerView),
        (status = 403, description = "Manager access required"),
        (status = 404, description = "Account not found")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> AppResult<Json<AccountManagerView>> {
    let account = state.account_service.get_account(id).await?;
    Ok(Json(account.into()))
}

/// Edit another account's name fields
#[utoipa::path(
    put,
    path = "/user/update/{id}",
    tag = "Managers only",
    params(("id" = i32, Path, description = "Account id")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Update outcome", body = AccountUpdateResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Target outranks the caller"),
        (status = 404, description = "Account not found")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn update_account(
    State(state): State<AppState>,
    Extension(CurrentAccount(caller)): Extension<CurrentAccount>,
    Path(id): Path<AccountId>,
    ValidatedJson(payload): ValidatedJson<UpdateAccountRequest>,
) -> AppResult<Json<AccountUpdateResponse>> {
    let target = state.account_service.get_account(id).await?;
    state.policy.authorize_field_update(&caller, &target)?;

    let changes = AccountChanges::from(payload);
    if changes.is_empty() {
        return Ok(Json(AccountUpdateResponse {
            message: DETAIL_NOTHING_TO_CHANGE.to_string(),
            user: target.into(),
        }));
    }

    let updated = state.account_service.update_fields(id, changes).await?;
    tracing::info!(caller_id = caller.id, account_id = id, "Account fields updated");

    Ok(Json(AccountUpdateResponse {
        message: DETAIL_UPDATED.to_string(),
        user: updated.into(),
    }))
}

/// Soft-delete an account of lower rank
#[utoipa::path(
    delete,
    path = "/user/delete/{id}",
    tag = "Managers only",
    params(("id" = i32, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account soft-deleted", body = MessageResponse),
        (status = 403, description = "Target has the caller's rank"),
        (status = 404, description = "Account not found")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(CurrentAccount(caller)): Extension<CurrentAccount>,
    Path(id): Path<AccountId>,
) -> AppResult<Json<MessageResponse>> {
    let target = state.account_service.get_account(id).await?;
    state.policy.authorize_delete(&caller, &target)?;

    state.account_service.soft_delete(id).await?;

    Ok(Json(MessageResponse::new("successfully removed")))
}

/// Greets manager-tier callers
#[utoipa::path(
    get,
    path = "/manager-check",
    tag = "Check Roles",
    responses(
        (status = 200, description = "Caller is manager tier", body = GreetingResponse),
        (status = 403, description = "Manager access required")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn manager_check(Extension(CurrentAccount(caller)): Extension<CurrentAccount>) -> Json<GreetingResponse> {
    Json(GreetingResponse::from(&caller))
}
