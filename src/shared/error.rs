use std::fmt;

#[derive(Debug)]
pub enum AppError {
    /// The server was reachable and rejected the request (HTTP 4xx).
    /// Never queued for retry; a rejected score must reach the user.
    Validation(String),
    /// The server was reachable and answered with a non-success status
    /// outside the validation range.
    Http { status: u16, message: String },
    /// Transport-level failure (connect error, timeout, DNS). The signal
    /// that a write should be queued instead of surfaced.
    Network(String),
    /// The durable local store is unavailable. Propagates uncaught so the
    /// UI can warn that scores may not survive a connectivity loss.
    Storage(String),
    Serialization(String),
    Configuration(String),
    Internal(String),
}

impl AppError {
    /// True for failures that mean "could not reach the server", which
    /// switch the engine into offline queueing.
    pub fn is_connectivity_failure(&self) -> bool {
        matches!(self, AppError::Network(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Http { status, message } => {
                write!(f, "HTTP error {}: {}", status, message)
            }
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage error: {}", msg),
            AppError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            AppError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Serialization(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        AppError::Internal(err)
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
