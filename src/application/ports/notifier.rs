/// Notification-only signals for UI collaborators. No payload contract
/// beyond "re-read the authoritative state".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncEvent {
    PendingCountChanged,
    ScoreUpdated,
    ConnectivityChanged,
}

/// Observer seam replacing DOM custom events: the engine fires, UI
/// subscribes. Implementations must not block; delivery is best-effort.
pub trait SyncNotifier: Send + Sync {
    fn notify(&self, event: SyncEvent);
}

/// Discards every event. Useful where no UI is attached.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl SyncNotifier for NullNotifier {
    fn notify(&self, _event: SyncEvent) {}
}
