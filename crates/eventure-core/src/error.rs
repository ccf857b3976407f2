//! Centralized error types for the recommendation engine.

use serde::Serialize;
use thiserror::Error;

/// Main error type for engine operations.
///
/// Deletes, unlikes and guarded edge creates that target a missing node or
/// edge are deliberately NOT errors: they succeed with zero effect. Only
/// store failures, malformed statements, bad payloads and relational-source
/// failures surface here, and none of them are retried by the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("graph store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("graph query failed: {0}")]
    Query(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("relational source error: {0}")]
    Source(#[from] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Wrap a driver failure raised while connecting or pinging the store.
    pub fn store_unavailable(err: impl std::fmt::Display) -> Self {
        Self::StoreUnavailable(err.to_string())
    }

    /// Wrap a driver failure raised while running a statement or decoding
    /// its rows.
    pub fn query(err: impl std::fmt::Display) -> Self {
        Self::Query(err.to_string())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The wire-level kind reported in a failure envelope.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
            Self::Query(_) => ErrorKind::QueryError,
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::Source(_) => ErrorKind::SourceError,
            Self::Config(_) => ErrorKind::ConfigError,
        }
    }
}

/// Coarse error classification exposed to callers of the operation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    StoreUnavailable,
    QueryError,
    ValidationError,
    SourceError,
    ConfigError,
}
