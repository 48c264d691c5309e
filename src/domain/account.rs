//! Account domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::Role;

/// Store-assigned account identifier. Never reused once a row is hard-deleted.
pub type AccountId = i32;

/// Account domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: String,
    pub password_hash: String,
    pub surname: String,
    pub name: String,
    pub middle_name: Option<String>,
    pub role: Role,
    /// `false` marks a soft-deleted account
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Apply a sparse update in place, refreshing `updated_at`.
    pub fn apply(&mut self, changes: &AccountChanges) {
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(surname) = &changes.surname {
            self.surname = surname.clone();
        }
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(middle_name) = &changes.middle_name {
            self.middle_name = Some(middle_name.clone());
        }
        if let Some(role) = changes.role {
            self.role = role;
        }
        self.updated_at = Utc::now();
    }

    pub fn soft_delete(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

/// Personal details supplied at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub surname: String,
    pub name: String,
    pub middle_name: Option<String>,
}

/// Data needed to insert a fresh account row.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub profile: ProfileFields,
    pub role: Role,
}

impl NewAccount {
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>, profile: ProfileFields) -> Self {
        Self {
            email: email.into(),
            password_hash: password_hash.into(),
            profile,
            role: Role::default(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Sparse update: `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub email: Option<String>,
    pub surname: Option<String>,
    pub name: Option<String>,
    pub middle_name: Option<String>,
    pub role: Option<Role>,
}

impl AccountChanges {
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.surname.is_none()
            && self.name.is_none()
            && self.middle_name.is_none()
            && self.role.is_none()
    }
}

/// Account view returned to the account owner.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountView {
    #[schema(example = "Userov")]
    pub surname: String,
    #[schema(example = "User")]
    pub name: String,
    pub middle_name: Option<String>,
    #[schema(example = "user@example.com")]
    pub email: String,
    pub role: Role,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            surname: account.surname,
            name: account.name,
            middle_name: account.middle_name,
            email: account.email,
            role: account.role,
        }
    }
}

/// Account view for manager-tier callers; includes id and activity flag.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountManagerView {
    #[schema(example = 1)]
    pub id: AccountId,
    #[serde(flatten)]
    pub account: AccountView,
    pub is_active: bool,
}

impl From<Account> for AccountManagerView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            is_active: account.is_active,
            account: AccountView::from(account),
        }
    }
}
