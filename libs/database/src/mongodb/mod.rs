//! MongoDB connector and utilities
//!
//! Provides connection management and readiness probes.

mod config;
mod connector;
mod errors;
mod health;
pub mod uuid_as_string;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config};
pub use errors::{DUPLICATE_KEY_CODE, is_duplicate_key};
pub use health::{HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
