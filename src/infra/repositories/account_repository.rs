//! Account repository with soft delete support.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::account::{self, ActiveModel, Entity as AccountEntity};
use crate::domain::{Account, AccountChanges, AccountId, NewAccount};
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// User store contract.
///
/// Lookups return soft-deleted rows too; callers decide what `is_active`
/// means for them. The store is the only place that can guarantee email
/// uniqueness under concurrency: `insert` and `update_fields` must fail with
/// `AppError::DuplicateActiveAccount` when the email is already taken.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by email, active or not
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Find account by ID, active or not
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Insert a fresh active account
    async fn insert(&self, account: NewAccount) -> AppResult<Account>;

    /// Apply a sparse update; `None` if the row does not exist
    async fn update_fields(&self, id: AccountId, changes: AccountChanges) -> AppResult<Option<Account>>;

    /// Mark the account inactive; no-op if already inactive or absent
    async fn soft_delete(&self, id: AccountId) -> AppResult<()>;

    /// Remove the row permanently
    async fn hard_delete(&self, id: AccountId) -> AppResult<()>;

    /// All rows ordered by id
    async fn list_all(&self) -> AppResult<Vec<Account>>;
}

/// Postgres-backed implementation of AccountRepository
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        AccountEntity::find()
            .filter(account::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        AccountEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Account::try_from)
            .transpose()
    }

    async fn insert(&self, new: NewAccount) -> AppResult<Account> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            surname: Set(new.profile.surname),
            name: Set(new.profile.name),
            middle_name: Set(new.profile.middle_name),
            role: Set(new.role.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Account::try_from(model)
    }

    async fn update_fields(&self, id: AccountId, changes: AccountChanges) -> AppResult<Option<Account>> {
        let Some(model) = AccountEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into();

        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(surname) = changes.surname {
            active.surname = Set(surname);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(middle_name) = changes.middle_name {
            active.middle_name = Set(Some(middle_name));
        }
        if let Some(role) = changes.role {
            active.role = Set(role.to_string());
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Account::try_from(model).map(Some)
    }

    async fn soft_delete(&self, id: AccountId) -> AppResult<()> {
        AccountEntity::update_many()
            .col_expr(account::Column::IsActive, Expr::value(false))
            .col_expr(account::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(account::Column::Id.eq(id))
            .filter(account::Column::IsActive.eq(true))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn hard_delete(&self, id: AccountId) -> AppResult<()> {
        let result = AccountEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list_all(&self) -> AppResult<Vec<Account>> {
        AccountEntity::find()
            .order_by_asc(account::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Account::try_from)
            .collect()
    }
}
