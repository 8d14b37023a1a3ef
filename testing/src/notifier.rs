//! Notifier test doubles.

use async_trait::async_trait;
use slotwise_core::notifier::{ChangeEvent, ChangeNotifier};
use tokio::sync::Mutex;

/// Captures published events for later assertions.
///
/// Mirrors production semantics: `publish` never fails and never blocks the
/// caller on delivery.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<ChangeEvent>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events published so far, in publish order.
    pub async fn events(&self) -> Vec<ChangeEvent> {
        self.events.lock().await.clone()
    }

    /// Number of events published so far.
    pub async fn count(&self) -> usize {
        self.events.lock().await.len()
    }
}

#[async_trait]
impl ChangeNotifier for RecordingNotifier {
    async fn publish(&self, event: ChangeEvent) {
        self.events.lock().await.push(event);
    }
}
