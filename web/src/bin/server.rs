//! Slotwise HTTP server.
//!
//! Wires the Postgres stores, the reservation coordinator, and the
//! WebSocket broadcaster into the Axum router and serves it.

use slotwise_core::reservation::ReservationCoordinator;
use slotwise_postgres::{PostgresBookingStore, PostgresExpertStore, connect, schema};
use slotwise_web::{AppState, Config, SlotBroadcaster, build_router};
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slotwise=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Slotwise HTTP server");

    let config = Config::from_env();
    info!(database_url = %config.postgres.url, "Configuration loaded");

    let pool = connect(&config.postgres.url, config.postgres.max_connections).await?;
    schema::init(&pool).await?;
    info!("Database connected");

    let experts = Arc::new(PostgresExpertStore::new(pool.clone()));
    let bookings = Arc::new(PostgresBookingStore::new(pool));
    let broadcaster = SlotBroadcaster::new();

    let coordinator = ReservationCoordinator::new(
        experts.clone(),
        bookings,
        Arc::new(broadcaster.clone()),
    );

    let state = AppState::new(coordinator, experts, broadcaster);
    let app = build_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            tracing::error!("Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully");
        },
        () = terminate => {
            info!("Received SIGTERM, shutting down gracefully");
        },
    }
}
