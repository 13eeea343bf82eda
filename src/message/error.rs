//! Persistence error types for the message store.
//!
//! Uses `thiserror` for typed variants callers can match on. Storage
//! failures are carried through unchanged; nothing here retries.

use super::domain::MessageId;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while reading or committing messages.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// A staged change refers to a message that no longer exists.
    #[error("message not found: {0}")]
    NotFound(MessageId),

    /// A message with this ID already exists.
    #[error("duplicate message: {0}")]
    DuplicateMessage(MessageId),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(Arc<dyn std::error::Error + Send + Sync>),

    /// A value could not be converted to or from its stored form.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A connection error occurred.
    #[error("connection error: {0}")]
    Connection(String),
}

impl RepositoryError {
    /// Creates a database error from any error type.
    #[must_use]
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Database(Arc::new(err))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        // Unique violations are mapped to `DuplicateMessage` at the insert
        // site, where the offending identifier is known.
        Self::database(err)
    }
}
