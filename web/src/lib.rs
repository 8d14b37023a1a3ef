//! Axum HTTP API and WebSocket fan-out for Slotwise.
//!
//! The web layer is a thin shell over `slotwise-core`: handlers parse the
//! request, call the coordinator or the expert store, and map the domain
//! error taxonomy onto HTTP statuses. The one piece of real machinery here
//! is [`SlotBroadcaster`], the in-process [`ChangeNotifier`] implementation
//! that fans change events out to WebSocket clients.
//!
//! # Request flow
//!
//! 1. HTTP request arrives at an Axum handler
//! 2. Body/query parsed into domain types
//! 3. Coordinator or store invoked
//! 4. `BookingError` mapped to a status via [`AppError`]
//! 5. On state changes, the broadcaster fans out to `/ws` subscribers
//!
//! [`ChangeNotifier`]: slotwise_core::notifier::ChangeNotifier

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod broadcast;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use broadcast::SlotBroadcaster;
pub use config::Config;
pub use error::AppError;
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
