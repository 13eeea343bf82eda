//! Error types for message domain construction.

use thiserror::Error;

/// Errors returned while constructing domain message values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageDomainError {
    /// A participant username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The message body is empty after trimming.
    #[error("message content must not be empty")]
    EmptyContent,

    /// The sender and recipient are the same user.
    #[error("cannot send a message to yourself")]
    SelfAddressed,

    /// The requested page number is below one.
    #[error("invalid page number {0}, expected a positive integer")]
    InvalidPageNumber(u32),

    /// The requested page size is below one.
    #[error("invalid page size {0}, expected a positive integer")]
    InvalidPageSize(u32),
}
