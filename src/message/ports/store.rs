//! Storage port for message rows.
//!
//! The store evaluates [`MessageQuery`] values it is handed and applies a
//! [`PendingChanges`] set atomically. Implementations decide how queries
//! are translated (in-process evaluation, SQL, ...); callers never
//! materialise a full collection to page it.

use crate::message::{
    domain::{Message, MessageId, MessageQuery, PageWindow, PendingChanges},
    error::RepositoryError,
};
use async_trait::async_trait;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Port for message persistence operations.
///
/// # Implementation Notes
///
/// Implementations must ensure:
/// - `fetch` returns rows in the query's [`SentOrder`] with a stable
///   tiebreak, so equal snapshots yield equal slices
/// - `count` and `fetch` apply the same filter
/// - `commit` applies every change or none of them
///
/// [`SentOrder`]: crate::message::domain::SentOrder
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Retrieves a message by its ID.
    ///
    /// Returns `None` if the message does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn find_by_id(&self, id: MessageId) -> RepositoryResult<Option<Message>>;

    /// Counts the messages matching the query's filter.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn count(&self, query: &MessageQuery) -> RepositoryResult<u64>;

    /// Returns the matching messages in query order, restricted to `window`
    /// when one is given.
    ///
    /// A window past the end of the result set yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the query fails.
    async fn fetch(
        &self,
        query: &MessageQuery,
        window: Option<PageWindow>,
    ) -> RepositoryResult<Vec<Message>>;

    /// Applies all staged changes in one atomic step and returns the number
    /// of rows affected.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if:
    /// - A staged insert reuses an existing message ID
    /// - A staged delete targets a message that no longer exists
    /// - The database connection fails
    async fn commit(&self, changes: PendingChanges) -> RepositoryResult<u64>;
}
