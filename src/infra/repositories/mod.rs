//! Repository layer - Data access abstraction
//!
//! `AccountRepository` is the user-store contract the services depend on.
//! `AccountStore` backs it with Postgres; `MemoryAccountStore` keeps rows
//! in process.

mod account_repository;
pub(crate) mod entities;
mod memory;

pub use account_repository::{AccountRepository, AccountStore};
pub use memory::MemoryAccountStore;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
