use crate::application::ports::{SyncEvent, SyncNotifier};
use tokio::sync::broadcast;

/// Fan-out notifier backed by a tokio broadcast channel. UI collaborators
/// subscribe and re-read the authoritative state when an event arrives;
/// events carry no payload and delivery to lagging subscribers is
/// best-effort.
pub struct BroadcastNotifier {
    sender: broadcast::Sender<SyncEvent>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl SyncNotifier for BroadcastNotifier {
    fn notify(&self, event: SyncEvent) {
        // A send error just means nobody is listening right now.
        let _ = self.sender.send(event);
    }
}
