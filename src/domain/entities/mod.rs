pub mod batch;
pub mod dirty_score;
pub mod heat_dataset;
pub mod score_update;
pub mod version_fingerprint;

pub use batch::{BatchEntry, BatchOutcome, ScoreRef};
pub use dirty_score::{DirtyScoreRecord, PendingScore};
pub use heat_dataset::{HeatDataset, HeatVersion};
pub use score_update::ScoreUpdate;
pub use version_fingerprint::VersionFingerprint;
