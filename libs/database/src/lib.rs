//! Database connectors shared by the API and its domains.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection, configuration and health checks
//! - `config` - `core_config::FromEnv` support for the configuration types
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "diner");
//! let client = connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
