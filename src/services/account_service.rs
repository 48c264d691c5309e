//! Account lifecycle - registration, reactivation, sparse updates,
//! role changes and soft deletion.
//!
//! Pure data operations: whether the caller may perform them is decided by
//! `AccessPolicy` before these are called.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{
    DETAIL_EMAIL_IN_USE, DETAIL_ENTER_PASSWORD, DETAIL_INVALID_PASSWORD, DETAIL_NOTHING_TO_CHANGE,
    DETAIL_UPDATED,
};
use crate::domain::{Account, AccountChanges, AccountId, AccountView, NewAccount, Password, ProfileFields, Role};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::AccountRepository;

/// Outcome of a self-service profile update.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub account: Account,
    /// Human-readable notes about what was applied or skipped
    pub details: Vec<String>,
}

/// Wire shape of a `ProfileUpdate`
#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileUpdateResponse {
    pub user: AccountView,
    pub details: Vec<String>,
}

impl From<ProfileUpdate> for ProfileUpdateResponse {
    fn from(update: ProfileUpdate) -> Self {
        Self {
            user: AccountView::from(update.account),
            details: update.details,
        }
    }
}

/// Account lifecycle trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an active account. An inactive account holding the same email
    /// is hard-deleted first, so reactivation always yields a new id.
    async fn register(&self, email: String, password_hash: String, profile: ProfileFields) -> AppResult<Account>;

    /// Get account by id whether active or not
    async fn get_account(&self, id: AccountId) -> AppResult<Account>;

    /// Find account by email whether active or not
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Active accounts only
    async fn list_active(&self) -> AppResult<Vec<Account>>;

    /// Sparse update; absent fields are left untouched
    async fn update_fields(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account>;

    async fn change_role(&self, id: AccountId, role: Role) -> AppResult<Account>;

    /// Idempotent; the row is kept
    async fn soft_delete(&self, id: AccountId) -> AppResult<()>;

    /// Owner-initiated update. An email change needs the current password
    /// and a free address; otherwise the email is skipped with a detail and
    /// the remaining fields still apply.
    async fn update_profile(
        &self,
        owner: &Account,
        changes: AccountChanges,
        password: Option<String>,
    ) -> AppResult<ProfileUpdate>;
}

/// Concrete implementation of AccountService over a user store.
pub struct AccountManager<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: AccountRepository + ?Sized> AccountManager<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Decide whether a requested email change may go through, recording a
    /// detail when it may not.
    async fn vet_email_change(
        &self,
        owner: &Account,
        email: &str,
        password: Option<&str>,
        details: &mut Vec<String>,
    ) -> AppResult<bool> {
        let Some(password) = password else {
            details.push(DETAIL_ENTER_PASSWORD.to_string());
            return Ok(false);
        };

        if !Password::from_hash(owner.password_hash.as_str()).verify(password) {
            details.push(DETAIL_INVALID_PASSWORD.to_string());
            return Ok(false);
        }

        if self.repo.find_by_email(email).await?.is_some() {
            details.push(DETAIL_EMAIL_IN_USE.to_string());
            return Ok(false);
        }

        Ok(true)
    }
}

#[async_trait]
impl<R: AccountRepository + ?Sized> AccountService for AccountManager<R> {
    async fn register(&self, email: String, password_hash: String, profile: ProfileFields) -> AppResult<Account> {
        match self.repo.find_by_email(&email).await? {
            Some(existing) if existing.is_active => return Err(AppError::DuplicateActiveAccount),
            Some(inactive) => {
                tracing::info!(old_id = inactive.id, "Reactivating deleted account as a new row");
                match self.repo.hard_delete(inactive.id).await {
                    // A concurrent registration removed it first; the insert reports the conflict.
                    Ok(()) | Err(AppError::NotFound) => {}
                    Err(e) => return Err(e),
                }
            }
            None => {}
        }

        let account = self
            .repo
            .insert(NewAccount::new(email, password_hash, profile))
            .await?;

        tracing::info!(account_id = account.id, "Account registered");
        Ok(account)
    }

    async fn get_account(&self, id: AccountId) -> AppResult<Account> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.repo.find_by_email(email).await
    }

    async fn list_active(&self) -> AppResult<Vec<Account>> {
        let accounts = self.repo.list_all().await?;
        Ok(accounts.into_iter().filter(|a| a.is_active).collect())
    }

    async fn update_fields(&self, id: AccountId, changes: AccountChanges) -> AppResult<Account> {
        self.repo.update_fields(id, changes).await?.ok_or_not_found()
    }

    async fn change_role(&self, id: AccountId, role: Role) -> AppResult<Account> {
        let account = self.update_fields(id, AccountChanges::role(role)).await?;
        tracing::info!(account_id = id, role = %role, "Account role changed");
        Ok(account)
    }

    async fn soft_delete(&self, id: AccountId) -> AppResult<()> {
        self.repo.soft_delete(id).await?;
        tracing::info!(account_id = id, "Account soft-deleted");
        Ok(())
    }

    async fn update_profile(
        &self,
        owner: &Account,
        mut changes: AccountChanges,
        password: Option<String>,
    ) -> AppResult<ProfileUpdate> {
        let mut details = Vec::new();

        if changes.is_empty() {
            details.push(DETAIL_NOTHING_TO_CHANGE.to_string());
            return Ok(ProfileUpdate {
                account: owner.clone(),
                details,
            });
        }

        if let Some(email) = changes.email.take() {
            if email != owner.email
                && self
                    .vet_email_change(owner, &email, password.as_deref(), &mut details)
                    .await?
            {
                changes.email = Some(email);
            }
        }

        if changes.is_empty() {
            if details.is_empty() {
                details.push(DETAIL_NOTHING_TO_CHANGE.to_string());
            }
            return Ok(ProfileUpdate {
                account: owner.clone(),
                details,
            });
        }

        let account = self.update_fields(owner.id, changes).await?;
        details.push(DETAIL_UPDATED.to_string());

        Ok(ProfileUpdate { account, details })
    }
}
