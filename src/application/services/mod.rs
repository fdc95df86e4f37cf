pub mod connectivity;
pub mod navigation_guard;
pub mod sync_service;

pub use connectivity::{ConnectivityHooks, ConnectivityTracker, Transition};
pub use navigation_guard::{NavigationDecision, NavigationGuard};
pub use sync_service::{SaveOutcome, SyncService, VersionCheck};
