//! API key infrastructure implementations
//!
//! Key generation, the store adapters and the lifecycle manager that
//! drives them.

mod generator;
mod manager;
mod postgres_repository;
mod repository;

pub use generator::ApiKeyGenerator;
pub use manager::ApiKeyManager;
pub use postgres_repository::PostgresApiKeyRepository;
pub use repository::InMemoryApiKeyRepository;
