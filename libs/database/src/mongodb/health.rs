use mongodb::Client;

use super::connector::ping;

/// Health check status for MongoDB
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Error details when unhealthy
    pub message: Option<String>,
}

/// Ping the server and report any error message
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    match ping(client).await {
        Ok(()) => HealthStatus {
            healthy: true,
            message: None,
        },
        Err(e) => HealthStatus {
            healthy: false,
            message: Some(e.to_string()),
        },
    }
}
