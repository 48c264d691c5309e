//! Infrastructure layer - External systems integration
//!
//! - Database connection and migrations
//! - User store implementations

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{AccountRepository, AccountStore, MemoryAccountStore};

#[cfg(test)]
pub use repositories::MockAccountRepository;
