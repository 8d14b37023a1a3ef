//! In-process event fan-out.
//!
//! [`SlotBroadcaster`] is the [`ChangeNotifier`] implementation behind the
//! WebSocket endpoint. Every event goes onto one global broadcast channel;
//! events that carry an expert topic additionally go onto a lazily-created
//! per-expert channel keyed `expert_{id}`. Delivery is best-effort: a send
//! with no receivers, a lagging receiver, or a dropped receiver never
//! surfaces to the publisher.

use async_trait::async_trait;
use slotwise_core::notifier::{ChangeEvent, ChangeNotifier};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

/// Capacity of each broadcast channel before slow receivers start lagging.
const CHANNEL_CAPACITY: usize = 1000;

type ChannelsMap = Arc<RwLock<HashMap<String, broadcast::Sender<ChangeEvent>>>>;

/// Broadcast hub for slot and booking change events.
///
/// Cheap to clone; clones share the underlying channels.
///
/// # Example
///
/// ```ignore
/// let broadcaster = SlotBroadcaster::new();
/// let mut rx = broadcaster.subscribe();
///
/// broadcaster.publish(event).await;
/// let received = rx.recv().await?;
/// ```
pub struct SlotBroadcaster {
    /// Every event, regardless of topic.
    global: broadcast::Sender<ChangeEvent>,
    /// Topic name to its channel, created on first use.
    topics: ChannelsMap,
}

impl SlotBroadcaster {
    /// Create a broadcaster with no subscribers yet.
    #[must_use]
    pub fn new() -> Self {
        let (global, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            global,
            topics: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Subscribe to every event.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.global.subscribe()
    }

    /// Subscribe to one topic, creating its channel if needed.
    pub async fn subscribe_topic(
        &self,
        topic: impl Into<String>,
    ) -> broadcast::Receiver<ChangeEvent> {
        let topic = topic.into();
        let mut topics = self.topics.write().await;
        let sender = topics
            .entry(topic)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Number of currently connected global subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.global.receiver_count()
    }

    /// Number of topics with a channel.
    pub async fn topic_count(&self) -> usize {
        self.topics.read().await.len()
    }
}

impl Default for SlotBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SlotBroadcaster {
    fn clone(&self) -> Self {
        Self {
            global: self.global.clone(),
            topics: Arc::clone(&self.topics),
        }
    }
}

#[async_trait]
impl ChangeNotifier for SlotBroadcaster {
    async fn publish(&self, event: ChangeEvent) {
        metrics::counter!("broadcast.published", "event" => event.name()).increment(1);

        // send() errors only when there are no receivers, which is fine.
        let _ = self.global.send(event.clone());

        if let Some(topic) = event.topic() {
            let topics = self.topics.read().await;
            if let Some(sender) = topics.get(&topic) {
                let _ = sender.send(event);
            } else {
                debug!(topic = %topic, "No subscribers on topic, skipping");
            }
        }
    }
}
