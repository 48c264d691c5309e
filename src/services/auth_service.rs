//! Authentication service - credentials in, session tokens out, and
//! session tokens back to live accounts.
//!
//! Logout has no server-side counterpart: there is no revocation list, so a
//! copy of a token kept after logout stays valid until it expires.

use std::sync::Arc;

use async_trait::async_trait;

use super::account_service::AccountService;
use super::token_service::{IssuedToken, TokenService};
use crate::domain::{Account, Password, ProfileFields};
use crate::errors::{AppError, AppResult};

/// Registration input as received from the client.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub profile: ProfileFields,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check the password confirmation, hash, and hand over to the account
    /// lifecycle.
    async fn register(&self, registration: Registration) -> AppResult<Account>;

    /// Verify credentials and issue a session token
    async fn login(&self, email: &str, password: &str) -> AppResult<IssuedToken>;

    /// Validate a token and load the live account it names
    async fn resolve(&self, token: &str) -> AppResult<Account>;
}

/// Concrete implementation of AuthService.
pub struct Authenticator {
    accounts: Arc<dyn AccountService>,
    tokens: Arc<TokenService>,
}

impl Authenticator {
    pub fn new(accounts: Arc<dyn AccountService>, tokens: Arc<TokenService>) -> Self {
        Self { accounts, tokens }
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn register(&self, registration: Registration) -> AppResult<Account> {
        if registration.password != registration.password_confirm {
            return Err(AppError::validation("Passwords do not match"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        self.accounts
            .register(registration.email, password_hash, registration.profile)
            .await
    }

    async fn login(&self, email: &str, password: &str) -> AppResult<IssuedToken> {
        let account = self
            .accounts
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !account.is_active {
            return Err(AppError::AccountDeleted);
        }

        if !Password::from_hash(account.password_hash.as_str()).verify(password) {
            return Err(AppError::InvalidCredentials);
        }

        let token = self.tokens.issue(account.id)?;
        tracing::info!(account_id = account.id, "Login succeeded");
        Ok(token)
    }

    async fn resolve(&self, token: &str) -> AppResult<Account> {
        let account_id = self
            .tokens
            .validate(token)
            .map_err(|_| AppError::Unauthenticated)?;

        // Account state is re-read on every request; the token only proves
        // identity.
        match self.accounts.get_account(account_id).await {
            Ok(account) if account.is_active => Ok(account),
            Ok(_) | Err(AppError::NotFound) => Err(AppError::Unauthenticated),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemoryAccountStore;
    use crate::services::AccountManager;
    use chrono::Duration;
    use jsonwebtoken::Algorithm;

    fn setup() -> (Authenticator, Arc<TokenService>, Arc<dyn AccountService>) {
        let accounts: Arc<dyn AccountService> =
            Arc::new(AccountManager::new(Arc::new(MemoryAccountStore::new())));
        let tokens = Arc::new(TokenService::new(
            b"test-secret-key-for-testing-only-32chars",
            Algorithm::HS256,
            Duration::hours(24),
        ));
        (
            Authenticator::new(accounts.clone(), tokens.clone()),
            tokens,
            accounts,
        )
    }

    fn registration(email: &str, password: &str, confirm: &str) -> Registration {
        Registration {
            email: email.to_string(),
            password: password.to_string(),
            password_confirm: confirm.to_string(),
            profile: ProfileFields {
                surname: "Liddell".to_string(),
                name: "Alice".to_string(),
                middle_name: None,
            },
        }
    }

    #[tokio::test]
    async fn test_register_rejects_confirmation_mismatch() {
        let (auth, _, accounts) = setup();
        let result = auth.register(registration("alice@x.com", "pass1", "pass2")).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
        assert!(accounts.find_by_email("alice@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_stores_digest_not_plaintext() {
        let (auth, _, _) = setup();
        let account = auth
            .register(registration("alice@x.com", "wonderland", "wonderland"))
            .await
            .unwrap();

        assert_ne!(account.password_hash, "wonderland");
        assert!(Password::from_hash(account.password_hash.as_str()).verify("wonderland"));
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let (auth, _, _) = setup();
        let result = auth.login("ghost@x.com", "whatever").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (auth, _, _) = setup();
        auth.register(registration("alice@x.com", "wonderland", "wonderland"))
            .await
            .unwrap();

        let result = auth.login("alice@x.com", "looking-glass").await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_deleted_account() {
        let (auth, _, accounts) = setup();
        let account = auth
            .register(registration("alice@x.com", "wonderland", "wonderland"))
            .await
            .unwrap();
        accounts.soft_delete(account.id).await.unwrap();

        let result = auth.login("alice@x.com", "wonderland").await;
        assert!(matches!(result, Err(AppError::AccountDeleted)));
    }

    #[tokio::test]
    async fn test_login_then_resolve() {
        let (auth, tokens, _) = setup();
        let account = auth
            .register(registration("alice@x.com", "wonderland", "wonderland"))
            .await
            .unwrap();

        let issued = auth.login("alice@x.com", "wonderland").await.unwrap();
        assert_eq!(tokens.validate(&issued.value), Ok(account.id));

        let resolved = auth.resolve(&issued.value).await.unwrap();
        assert_eq!(resolved.id, account.id);
    }

    #[tokio::test]
    async fn test_resolve_rejects_soft_deleted_account() {
        let (auth, _, accounts) = setup();
        let account = auth
            .register(registration("alice@x.com", "wonderland", "wonderland"))
            .await
            .unwrap();
        let issued = auth.login("alice@x.com", "wonderland").await.unwrap();

        accounts.soft_delete(account.id).await.unwrap();

        let result = auth.resolve(&issued.value).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_resolve_rejects_unknown_account() {
        let (auth, tokens, _) = setup();
        let issued = tokens.issue(999).unwrap();

        let result = auth.resolve(&issued.value).await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_resolve_rejects_garbage() {
        let (auth, _, _) = setup();
        let result = auth.resolve("garbage").await;
        assert!(matches!(result, Err(AppError::Unauthenticated)));
    }
}
