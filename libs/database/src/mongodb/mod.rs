//! MongoDB connection management and health checks

mod config;
mod connector;
mod health;

pub use config::{FALLBACK_DATABASE, MongoConfig};
pub use connector::{
    MongoError, close, connect_from_config, connect_from_config_with_retry, database_for,
};
pub use health::{HealthStatus, check_health_detailed};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
