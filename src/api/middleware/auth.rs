//! Session authentication and role-tier middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::session::extract_token;
use crate::api::AppState;
use crate::domain::Account;
use crate::errors::AppError;

/// Live account resolved from the session token
#[derive(Clone, Debug)]
pub struct CurrentAccount(pub Account);

/// Session authentication middleware.
///
/// Resolves the token to an active account and injects `CurrentAccount`
/// into the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(request.headers()).ok_or(AppError::Unauthenticated)?;
    let account = state.auth_service.resolve(&token).await?;

    request.extensions_mut().insert(CurrentAccount(account));

    Ok(next.run(request).await)
}

/// Must run after `auth_middleware`.
pub async fn require_manager_tier(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = current_account(&request)?;
    state.policy.require_manager(caller)?;
    Ok(next.run(request).await)
}

/// Must run after `auth_middleware`.
pub async fn require_admin_tier(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = current_account(&request)?;
    state.policy.require_admin(caller)?;
    Ok(next.run(request).await)
}

fn current_account(request: &Request) -> Result<&Account, AppError> {
    request
        .extensions()
        .get::<CurrentAccount>()
        .map(|current| &current.0)
        .ok_or(AppError::Unauthenticated)
}
