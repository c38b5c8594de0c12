//! Error types for the platform boundary.
//!
//! None of these ever reach the page: components catch them at the point of
//! access, log, and fall back to a safe default.

/// Failure reading or writing the persistent key-value store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage access failed: {0}")]
    Access(String),
}

/// Failure querying or subscribing to the system color-scheme signal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("media queries are not supported")]
    Unsupported,
    #[error("media query failed: {0}")]
    Query(String),
}

/// Failure parsing widget configuration overrides.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid widget config: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string that is neither `"light"` nor `"dark"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0:?}")]
pub struct UnknownTheme(pub String);
