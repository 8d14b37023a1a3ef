//! Database seeding binary.
//!
//! Resets the database and loads the sample experts with a week of
//! unbooked slots. Intended for development only; it truncates every
//! table first.

use slotwise_postgres::{connect, schema, seed};
use slotwise_web::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slotwise=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(database_url = %config.postgres.url, "Seeding database");

    let pool = connect(&config.postgres.url, config.postgres.max_connections).await?;
    schema::init(&pool).await?;

    let count = seed::run(&pool).await?;
    info!(experts = count, "Seed complete");
    Ok(())
}
