//! Key store implementations and the key lifecycle service

mod generator;
mod in_memory;
mod postgres;
mod service;

pub use generator::KeyGenerator;
pub use in_memory::InMemoryApiKeyRepository;
pub use postgres::PostgresApiKeyRepository;
pub use service::{ApiKeyService, ValidatedKey};
