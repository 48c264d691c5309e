//! API layer - HTTP handlers and middleware
//!
//! - Request handlers
//! - Middleware (session authentication, role tiers)
//! - Custom extractors
//! - Session cookie transport
//! - Route definitions

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod session;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use session::SessionCookie;
pub use state::AppState;
