use crate::application::ports::{SyncEvent, SyncNotifier};
use crate::domain::value_objects::JudgeId;
use std::sync::{Arc, Mutex, RwLock};
use tracing::debug;

/// Edge transition produced by a connectivity report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Reconnected,
    Disconnected,
}

/// Reactions to connectivity edges. `on_reconnect` is expected to kick
/// off a queue drain for the judge; `on_disconnect` may only update UI
/// indicators and must not touch the network.
pub trait ConnectivityHooks: Send + Sync {
    fn on_reconnect(&self, judge: JudgeId);
    fn on_disconnect(&self);
}

#[derive(Debug, Default)]
struct TrackerState {
    /// None until the first report; the first report is always an edge,
    /// so a queue left over from a previous session drains on startup.
    online: Option<bool>,
    judge: Option<JudgeId>,
}

/// Process-wide network-state oracle, constructor-injected rather than a
/// global so tests and multiple judges do not share hidden state.
///
/// Reports come both from browser-style online/offline signals and from
/// the outcome of actual application requests; request-level signals are
/// authoritative, since a device can see a network interface while the
/// scoring server stays unreachable. Many independent components report
/// on every request outcome, so hooks fire only on edges — repeated
/// identical reports are deduplicated by an atomic check-and-set with no
/// await point in between.
pub struct ConnectivityTracker {
    state: Mutex<TrackerState>,
    hooks: RwLock<Option<Arc<dyn ConnectivityHooks>>>,
    notifier: Arc<dyn SyncNotifier>,
}

impl ConnectivityTracker {
    pub fn new(notifier: Arc<dyn SyncNotifier>) -> Self {
        Self {
            state: Mutex::new(TrackerState::default()),
            hooks: RwLock::new(None),
            notifier,
        }
    }

    pub fn set_hooks(&self, hooks: Arc<dyn ConnectivityHooks>) {
        *self.hooks.write().expect("hooks lock poisoned") = Some(hooks);
    }

    /// Record an observed connectivity signal. Returns the edge, if any;
    /// equal consecutive reports return `None` and fire nothing.
    pub fn report(&self, is_online: bool, judge: Option<JudgeId>) -> Option<Transition> {
        let (transition, judge_for_hook) = {
            let mut state = self.state.lock().expect("state lock poisoned");
            if let Some(judge) = judge {
                state.judge = Some(judge);
            }
            if state.online == Some(is_online) {
                return None;
            }
            state.online = Some(is_online);
            let transition = if is_online {
                Transition::Reconnected
            } else {
                Transition::Disconnected
            };
            (transition, state.judge)
        };

        debug!(online = is_online, "connectivity transition");
        self.notifier.notify(SyncEvent::ConnectivityChanged);

        let hooks = self.hooks.read().expect("hooks lock poisoned").clone();
        if let Some(hooks) = hooks {
            match transition {
                Transition::Reconnected => {
                    if let Some(judge) = judge_for_hook {
                        hooks.on_reconnect(judge);
                    }
                }
                Transition::Disconnected => hooks.on_disconnect(),
            }
        }

        Some(transition)
    }

    /// Current state, side-effect free. Optimistically online until the
    /// first report, matching the browser's default assumption.
    pub fn is_online(&self) -> bool {
        self.state
            .lock()
            .expect("state lock poisoned")
            .online
            .unwrap_or(true)
    }

    /// The judge most recently associated with a report; whose queue a
    /// reconnect drains.
    pub fn active_judge(&self) -> Option<JudgeId> {
        self.state.lock().expect("state lock poisoned").judge
    }
}
