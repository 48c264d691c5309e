//! API middleware.

mod auth;

pub use auth::{auth_middleware, require_admin_tier, require_manager_tier, CurrentAccount};
