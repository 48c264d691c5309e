//! Service Container - wires the account store into the services.
//!
//! Handlers only ever see the traits exposed here, so the store behind them
//! (Postgres or in-memory) is chosen once at startup.

use std::sync::Arc;

use super::{AccessPolicy, AccountManager, AccountService, AuthService, Authenticator, TokenService};
use crate::config::Config;
use crate::infra::{AccountRepository, AccountStore};

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get account lifecycle service
    fn accounts(&self) -> Arc<dyn AccountService>;

    fn policy(&self) -> AccessPolicy;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    account_service: Arc<dyn AccountService>,
    tokens: Arc<TokenService>,
    repository: Arc<dyn AccountRepository>,
    policy: AccessPolicy,
}

impl Services {
    /// Build every service on top of an already-chosen account store
    pub fn with_repository(repository: Arc<dyn AccountRepository>, config: &Config) -> Self {
        let tokens = Arc::new(TokenService::from_config(config));
        let account_service: Arc<dyn AccountService> =
            Arc::new(AccountManager::new(repository.clone()));
        let auth_service = Arc::new(Authenticator::new(account_service.clone(), tokens.clone()));

        Self {
            auth_service,
            account_service,
            tokens,
            repository,
            policy: AccessPolicy::from_config(config),
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: &Config) -> Self {
        Self::with_repository(Arc::new(AccountStore::new(db)), config)
    }

    pub fn tokens(&self) -> Arc<TokenService> {
        self.tokens.clone()
    }

    /// Raw store access, for seeding
    pub fn repository(&self) -> Arc<dyn AccountRepository> {
        self.repository.clone()
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn accounts(&self) -> Arc<dyn AccountService> {
        self.account_service.clone()
    }

    fn policy(&self) -> AccessPolicy {
        self.policy
    }
}
