//! HTTP request handlers.
//!
//! This module contains all HTTP handlers organized by domain.

pub mod bookings;
pub mod experts;
pub mod health;
pub mod websocket;

pub use health::health_check;
