//! WebSocket endpoint for real-time change events.
//!
//! Connected clients receive every published [`ChangeEvent`] as JSON in
//! its wire shape:
//!
//! ```json
//! { "event": "slotBooked", "data": { "expertId": "...", "slotId": "..." } }
//! ```
//!
//! Clients may scope interest to an expert topic:
//!
//! ```json
//! { "type": "joinExpert", "expertId": "..." }
//! { "type": "leaveExpert", "expertId": "..." }
//! ```
//!
//! Both current events are broadcast globally, so topic membership does not
//! yet narrow delivery; it is tracked per connection so narrowing later is
//! not a protocol change. Delivery is best-effort: a client that lags past
//! the channel capacity misses events and is told nothing about it.

use crate::state::AppState;
use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, stream::StreamExt};
use serde::{Deserialize, Serialize};
use slotwise_core::notifier::expert_topic;
use slotwise_core::types::ExpertId;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

/// Messages a client may send over the socket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Scope interest to one expert's events.
    #[serde(rename_all = "camelCase")]
    JoinExpert {
        /// The expert to follow.
        expert_id: ExpertId,
    },
    /// Drop interest in one expert's events.
    #[serde(rename_all = "camelCase")]
    LeaveExpert {
        /// The expert to stop following.
        expert_id: ExpertId,
    },
    /// Keep-alive.
    Ping,
}

/// Upgrade the connection and hand it to the socket loop.
#[allow(clippy::unused_async)] // Axum handler signature requires async
pub async fn handle(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    info!("WebSocket connection requested");
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle WebSocket connection lifecycle.
///
/// Spawns two concurrent tasks:
/// 1. **Sender**: forwards broadcast events to the client
/// 2. **Receiver**: processes topic membership and pings from the client
#[allow(clippy::cognitive_complexity)] // WebSocket handler with multiple message types
async fn handle_socket(socket: WebSocket, state: AppState) {
    info!("WebSocket connection established");
    metrics::gauge!("websocket.connections").increment(1.0);

    let (mut sender, mut receiver) = socket.split();

    // Topics this connection has joined. Tracked for the contract even
    // though delivery is currently global.
    let joined = Arc::new(RwLock::new(HashSet::<String>::new()));

    let mut event_rx = state.broadcaster.subscribe();

    let mut send_task = tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            let message = match serde_json::to_string(&event) {
                Ok(json) => Message::Text(json),
                Err(e) => {
                    error!(error = %e, "Failed to serialize change event");
                    continue;
                }
            };

            if sender.send(message).await.is_err() {
                // Client disconnected
                break;
            }
        }

        debug!("WebSocket send task terminated");
    });

    let recv_joined = Arc::clone(&joined);
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::JoinExpert { expert_id }) => {
                        let topic = expert_topic(expert_id);
                        debug!(topic = %topic, "Client joined expert topic");
                        recv_joined.write().await.insert(topic);
                    }
                    Ok(ClientMessage::LeaveExpert { expert_id }) => {
                        let topic = expert_topic(expert_id);
                        debug!(topic = %topic, "Client left expert topic");
                        recv_joined.write().await.remove(&topic);
                    }
                    Ok(ClientMessage::Ping) => {
                        debug!("Received ping from client");
                    }
                    Err(e) => {
                        warn!(error = %e, "Unparseable WebSocket message from client");
                    }
                },
                Message::Binary(_) => {
                    warn!("Received unexpected binary message");
                }
                Message::Ping(_) | Message::Pong(_) => {
                    // Axum answers protocol pings automatically
                }
                Message::Close(_) => {
                    info!("Client requested close");
                    break;
                }
            }
        }

        debug!("WebSocket receive task terminated");
    });

    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        },
        _ = (&mut recv_task) => {
            send_task.abort();
        },
    }

    metrics::gauge!("websocket.connections").decrement(1.0);
    info!("WebSocket connection closed");
}
