pub mod entities;
pub mod score_merge;
pub mod value_objects;

pub use entities::{
    BatchEntry, BatchOutcome, DirtyScoreRecord, HeatDataset, HeatVersion, PendingScore, ScoreRef,
    ScoreUpdate, VersionFingerprint,
};
pub use value_objects::{JudgeId, ScoreKey};
