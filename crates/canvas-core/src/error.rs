use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid date range: {0}")]
    Range(String),

    #[error("Hashing error: {0}")]
    Hash(String),

    // Core reads the env file but nothing else; callers map other I/O here.
    #[error("I/O-like error (mapped into core): {0}")]
    IoLike(String),
}

impl Error {
    /// True for errors the operator fixes by editing the env file.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_) | Error::Range(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Hash(e.to_string())
    }
}
