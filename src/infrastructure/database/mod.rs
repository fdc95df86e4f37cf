pub mod connection_pool;
pub mod sqlite_score_store;

pub use connection_pool::ConnectionPool;
pub use sqlite_score_store::SqliteScoreStore;
