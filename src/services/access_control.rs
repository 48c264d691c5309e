//! Role-based authorization.
//!
//! Every check compares `Role` values by their total order
//! (`User < Manager < Admin`). Failures are always `AppError::Forbidden`;
//! the attached reason only reaches the logs.

use crate::config::Config;
use crate::domain::{Account, Role};
use crate::errors::{AppError, AppResult};

/// Authorization rules for acting on accounts.
#[derive(Debug, Clone, Copy)]
pub struct AccessPolicy {
    /// Whether a caller may edit non-role fields of an account with the
    /// same role as their own (e.g. manager editing a manager).
    pub allow_peer_edits: bool,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            allow_peer_edits: true,
        }
    }
}

impl AccessPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            allow_peer_edits: config.allow_peer_manager_edits,
        }
    }

    /// Listing and reading arbitrary accounts.
    pub fn require_manager(&self, caller: &Account) -> AppResult<()> {
        if caller.role.is_manager_tier() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Manager access required"))
        }
    }

    pub fn require_admin(&self, caller: &Account) -> AppResult<()> {
        if caller.role.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required"))
        }
    }

    /// Editing another account's name fields.
    pub fn authorize_field_update(&self, caller: &Account, target: &Account) -> AppResult<()> {
        self.require_manager(caller)?;

        let allowed = if self.allow_peer_edits {
            caller.role >= target.role
        } else {
            caller.role > target.role
        };

        if allowed {
            Ok(())
        } else {
            Err(AppError::Forbidden("You do not have permission to perform this action"))
        }
    }

    /// Assigning a role. Admin promotion never goes through here.
    pub fn authorize_role_change(&self, caller: &Account, target: &Account, new_role: Role) -> AppResult<()> {
        self.require_admin(caller)?;

        if new_role == Role::Admin {
            return Err(AppError::Forbidden("You can only set user or manager roles"));
        }
        if target.role >= caller.role {
            return Err(AppError::Forbidden("You can not demote other admins"));
        }
        Ok(())
    }

    /// Soft-deleting another account: strictly lower rank only.
    pub fn authorize_delete(&self, caller: &Account, target: &Account) -> AppResult<()> {
        self.require_manager(caller)?;

        if caller.role > target.role {
            Ok(())
        } else {
            Err(AppError::Forbidden("You can not delete accounts of your rank or above"))
        }
    }
}
