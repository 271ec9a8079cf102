//! API layer - HTTP endpoints

pub mod auth;
pub mod health;
pub mod keys;
pub mod router;
pub mod state;
pub mod summarize;
pub mod types;

pub use router::create_router;
pub use state::AppState;
