//! User store implementations and the provisioning service

mod in_memory;
mod postgres;
mod service;

pub use in_memory::InMemoryUserRepository;
pub use postgres::PostgresUserRepository;
pub use service::{ProvisionOutcome, UserService};
