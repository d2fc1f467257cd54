//! Application state management

use mongodb::{Client, Database};

/// Shared application state
///
/// Built once after the store answered a ping; the client is closed by the
/// shutdown cleanup.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
