//! Application state - Dependency injection container.

use std::sync::Arc;

use super::session::SessionCookie;
use crate::config::Config;
use crate::infra::Database;
use crate::services::{AccessPolicy, AccountService, AuthService, ServiceContainer, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// Account lifecycle service
    pub account_service: Arc<dyn AccountService>,
    pub policy: AccessPolicy,
    pub session: SessionCookie,
    /// Database handle for health checks; absent for in-memory stores
    pub database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state backed by the Postgres store.
    pub fn from_config(database: Arc<Database>, config: &Config) -> Self {
        let services = Services::from_connection(database.get_connection(), config);
        Self::from_services(&services, config, Some(database))
    }

    /// Create application state from an already-built service container.
    pub fn from_services<C: ServiceContainer + ?Sized>(
        services: &C,
        config: &Config,
        database: Option<Arc<Database>>,
    ) -> Self {
        Self {
            auth_service: services.auth(),
            account_service: services.accounts(),
            policy: services.policy(),
            session: SessionCookie::from_config(config),
            database,
        }
    }
}
