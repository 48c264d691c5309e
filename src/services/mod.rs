//! Application services layer - Use cases and business logic.
//!
//! Services depend on the `AccountRepository` abstraction, never on a
//! concrete store.

mod access_control;
mod account_service;
mod auth_service;
pub mod container;
mod seeder;
mod token_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use access_control::AccessPolicy;
pub use account_service::{AccountManager, AccountService, ProfileUpdate, ProfileUpdateResponse};
pub use auth_service::{AuthService, Authenticator, Registration};
pub use seeder::{seed_demo_accounts, SeedAccount, DEMO_ACCOUNTS};
pub use token_service::{Claims, IssuedToken, TokenError, TokenService};
