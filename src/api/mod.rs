//! API layer - HTTP endpoints and middleware

pub mod auth;
pub mod docs;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod teams;
pub mod types;

pub use middleware::RequireToken;
pub use router::create_router_with_state;
pub use state::AppState;
