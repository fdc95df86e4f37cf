use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the scoring server, no trailing slash.
    pub base_url: String,
    pub request_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Run the periodic background drain of the dirty-score queue.
    pub auto_sync: bool,
    /// Seconds between background drain attempts.
    pub sync_interval: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite:data/scoresync.db".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            server: ServerConfig {
                base_url: "http://localhost:3000".to_string(),
                request_timeout: 30,
            },
            sync: SyncConfig {
                auto_sync: true,
                sync_interval: 30,
            },
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("SCORESYNC_DATABASE_URL") {
            if !v.trim().is_empty() {
                cfg.database.url = v;
            }
        }
        if let Ok(v) = std::env::var("SCORESYNC_SERVER_URL") {
            if !v.trim().is_empty() {
                cfg.server.base_url = v.trim_end_matches('/').to_string();
            }
        }
        if let Ok(v) = std::env::var("SCORESYNC_REQUEST_TIMEOUT") {
            if let Some(value) = parse_u64(&v) {
                cfg.server.request_timeout = value.max(1);
            }
        }
        if let Ok(v) = std::env::var("SCORESYNC_AUTO_SYNC") {
            cfg.sync.auto_sync = parse_bool(&v, cfg.sync.auto_sync);
        }
        if let Ok(v) = std::env::var("SCORESYNC_SYNC_INTERVAL") {
            if let Some(value) = parse_u64(&v) {
                cfg.sync.sync_interval = value.max(1);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.server.base_url.trim().is_empty() {
            return Err("Server base_url must not be empty".to_string());
        }
        if self.sync.sync_interval == 0 {
            return Err("Sync interval must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn parse_bool(s: &str, default: bool) -> bool {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

fn parse_u64(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}
