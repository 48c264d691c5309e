//! Ordered role hierarchy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ROLE_ADMIN, ROLE_MANAGER, ROLE_USER};
use crate::errors::AppError;

/// Account role. Declaration order is the privilege order:
/// `User < Manager < Admin`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Manager => ROLE_MANAGER,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Manager-tier operations are open to managers and admins.
    pub fn is_manager_tier(&self) -> bool {
        *self >= Role::Manager
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            ROLE_USER => Ok(Role::User),
            ROLE_MANAGER => Ok(Role::Manager),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(AppError::validation(format!("Unknown role '{}'", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::User < Role::Manager);
        assert!(Role::Manager < Role::Admin);
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_role_round_trips_through_string() {
        for role in [Role::User, Role::Manager, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn test_unknown_role_rejected() {
        assert!(matches!("root".parse::<Role>(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_manager_tier() {
        assert!(!Role::User.is_manager_tier());
        assert!(Role::Manager.is_manager_tier());
        assert!(Role::Admin.is_manager_tier());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }
}
