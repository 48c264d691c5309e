//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{admin_handler, auth_handler, manager_handler, profile_handler};
use crate::config::SESSION_COOKIE_NAME;
use crate::domain::{AccountManagerView, AccountView, Role};
use crate::services::ProfileUpdateResponse;
use crate::types::{GreetingResponse, MessageResponse};

/// OpenAPI documentation for the account service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Service",
        version = "0.1.0",
        description = "User accounts with session cookies and tiered role-based management"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        auth_handler::register,
        auth_handler::login,
        auth_handler::logout,
        profile_handler::get_profile,
        profile_handler::update_profile,
        profile_handler::delete_self,
        manager_handler::list_accounts,
        manager_handler::get_account,
        manager_handler::update_account,
        manager_handler::delete_account,
        manager_handler::manager_check,
        admin_handler::set_role,
        admin_handler::admin_check,
    ),
    components(
        schemas(
            Role,
            AccountView,
            AccountManagerView,
            ProfileUpdateResponse,
            MessageResponse,
            GreetingResponse,
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::LoginResponse,
            profile_handler::ProfileUpdateRequest,
            manager_handler::UpdateAccountRequest,
            manager_handler::AccountUpdateResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and logout"),
        (name = "General", description = "Self-service on the caller's own account"),
        (name = "Managers only", description = "Reading, editing and deleting other accounts"),
        (name = "Admins only", description = "Role assignment"),
        (name = "Check Roles", description = "Role tier probes")
    )
)]
pub struct ApiDoc;

/// Security schemes: the session cookie set by /login, or the same token as
/// a Bearer header
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(SESSION_COOKIE_NAME))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /login"))
                        .build(),
                ),
            );
        }
    }
}
