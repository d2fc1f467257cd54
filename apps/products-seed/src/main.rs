//! Products seed - resets the products collection to the sample catalog
//!
//! Destructive: every existing product is deleted first. The connection is
//! closed whether seeding succeeded or not; failures exit non-zero.

use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::mongodb::{close, connect_from_config, database_for, MongoConfig};
use domain_products::{seed::seed, MongoProductRepository, ProductService};
use tracing::{error, info};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();
    core_config::load_dotenv();
    init_tracing(&Environment::from_env());

    let config = MongoConfig::from_env()?.with_app_name(env!("CARGO_PKG_NAME"));

    let client = connect_from_config(&config).await?;
    let db = database_for(&client, &config);
    info!("Connected to MongoDB database: {}", db.name());

    let service = ProductService::new(MongoProductRepository::new(&db));
    let result = seed(&service).await;

    close(client).await;
    info!("Database connection closed.");

    let report = result.inspect_err(|e| error!("Error seeding database: {}", e))?;
    info!(
        deleted = report.deleted,
        inserted = report.inserted.len(),
        total = report.total,
        "Seeding complete"
    );

    Ok(())
}
