//! Store connectors for the catalog.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connection management and health checks
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog");
//! let client = mongodb::connect_from_config_with_retry(&config, None).await?;
//! let db = mongodb::database_for(&client, &config);
//! // ...
//! mongodb::close(client).await;
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
