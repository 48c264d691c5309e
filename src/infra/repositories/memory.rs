//! In-process account store.
//!
//! Same contract as the Postgres store, including the unique email rule,
//! behind a single `RwLock`. Ids come from a monotonically increasing
//! counter so a hard-deleted id is never handed out again.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::AccountRepository;
use crate::domain::{Account, AccountChanges, AccountId, NewAccount};
use crate::errors::{AppError, AppResult};

#[derive(Default)]
struct Inner {
    rows: BTreeMap<AccountId, Account>,
    last_id: AccountId,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<AccountId>) -> bool {
        self.rows
            .values()
            .any(|row| row.email == email && Some(row.id) != except)
    }
}

#[derive(Default)]
pub struct MemoryAccountStore {
    inner: RwLock<Inner>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().find(|row| row.email == email).cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, new: NewAccount) -> AppResult<Account> {
        let mut inner = self.inner.write().await;
        if inner.email_taken(&new.email, None) {
            return Err(AppError::DuplicateActiveAccount);
        }

        inner.last_id += 1;
        let now = Utc::now();
        let account = Account {
            id: inner.last_id,
            email: new.email,
            password_hash: new.password_hash,
            surname: new.profile.surname,
            name: new.profile.name,
            middle_name: new.profile.middle_name,
            role: new.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_fields(&self, id: AccountId, changes: AccountChanges) -> AppResult<Option<Account>> {
        let mut inner = self.inner.write().await;
        if let Some(email) = &changes.email {
            if inner.email_taken(email, Some(id)) {
                return Err(AppError::DuplicateActiveAccount);
            }
        }

        Ok(inner.rows.get_mut(&id).map(|row| {
            row.apply(&changes);
            row.clone()
        }))
    }

    async fn soft_delete(&self, id: AccountId) -> AppResult<()> {
        if let Some(row) = self.inner.write().await.rows.get_mut(&id) {
            if row.is_active {
                row.soft_delete();
            }
        }
        Ok(())
    }

    async fn hard_delete(&self, id: AccountId) -> AppResult<()> {
        self.inner
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }

    async fn list_all(&self) -> AppResult<Vec<Account>> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }
}
