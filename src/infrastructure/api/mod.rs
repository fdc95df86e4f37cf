pub mod http_scoring_api;

pub use http_scoring_api::HttpScoringApi;
