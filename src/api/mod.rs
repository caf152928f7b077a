//! API layer - HTTP endpoints and middleware

pub mod dashboard;
pub mod health;
pub mod middleware;
pub mod playground;
pub mod router;
pub mod session;
pub mod state;
pub mod types;
pub mod validation;

pub use router::create_router_with_state;
pub use state::AppState;
