pub mod judge_id;
pub mod score_key;

pub use judge_id::JudgeId;
pub use score_key::ScoreKey;
