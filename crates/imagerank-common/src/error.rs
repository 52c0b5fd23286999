//! Unified error type for imagerank.
//!
//! Store adapters and the voting service funnel their failures into [`Error`],
//! which carries enough context for HTTP handlers to derive a status code via
//! [`Error::http_status`].

/// Boxed source error from a third-party client.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type covering all failure modes of the voting service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The object storage service returned an error.
    #[error("Object store error: {source}")]
    ObjectStore {
        /// The underlying client error.
        source: BoxError,
    },

    /// The key-value store returned an error.
    #[error("Score store error: {source}")]
    ScoreStore {
        /// The underlying client error.
        source: BoxError,
    },

    /// A stored score record could not be interpreted.
    #[error("Invalid score record for {key}: {reason}")]
    InvalidRecord {
        /// Image key of the offending record.
        key: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::ObjectStore { .. } => 502,
            Error::ScoreStore { .. } => 502,
            Error::InvalidRecord { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Short machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::ObjectStore { .. } => "object_store_error",
            Error::ScoreStore { .. } => "score_store_error",
            Error::InvalidRecord { .. } => "invalid_record",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Convenience constructor for [`Error::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Convenience constructor for [`Error::ObjectStore`].
    pub fn object_store(source: impl Into<BoxError>) -> Self {
        Error::ObjectStore {
            source: source.into(),
        }
    }

    /// Convenience constructor for [`Error::ScoreStore`].
    pub fn score_store(source: impl Into<BoxError>) -> Self {
        Error::ScoreStore {
            source: source.into(),
        }
    }

    /// Convenience constructor for [`Error::InvalidRecord`].
    pub fn invalid_record(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidRecord {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Convenience constructor for [`Error::Internal`].
    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
