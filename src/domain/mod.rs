//! Domain layer - entities, repository traits, and core errors

pub mod api_key;
pub mod github;
pub mod user;

mod error;

pub use error::DomainError;
