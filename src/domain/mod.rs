//! Domain layer - Core business entities and logic
//!
//! Account identity, the ordered role hierarchy and password hashing.
//! Nothing in here touches the database or HTTP.

pub mod account;
pub mod password;
pub mod role;

pub use account::{
    Account, AccountChanges, AccountId, AccountManagerView, AccountView, NewAccount, ProfileFields,
};
pub use password::Password;
pub use role::Role;
