//! In-memory implementation of the `MessageStore` port.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::message::{
    domain::{Message, MessageId, MessageQuery, PageWindow, PendingChanges},
    error::RepositoryError,
    ports::store::{MessageStore, RepositoryResult},
};

/// In-memory implementation of [`MessageStore`].
///
/// Thread-safe via internal [`RwLock`]. Suitable for tests only.
///
/// # Example
///
/// ```
/// use letterbox::message::adapters::memory::InMemoryMessageStore;
///
/// let store = InMemoryMessageStore::new();
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct InMemoryMessageStore {
    messages: Arc<RwLock<HashMap<MessageId, Message>>>,
}

impl InMemoryMessageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `messages`.
    ///
    /// Later duplicates replace earlier messages with the same ID.
    #[must_use]
    pub fn with_messages(messages: impl IntoIterator<Item = Message>) -> Self {
        let rows = messages
            .into_iter()
            .map(|message| (message.id(), message))
            .collect();
        Self {
            messages: Arc::new(RwLock::new(rows)),
        }
    }

    /// Returns the number of stored messages.
    ///
    /// Returns `0` if the internal lock is poisoned. For error-propagating
    /// access, use the store trait methods instead.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.read().map(|guard| guard.len()).unwrap_or(0)
    }

    /// Returns `true` if no messages are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_guard(
        &self,
    ) -> RepositoryResult<std::sync::RwLockReadGuard<'_, HashMap<MessageId, Message>>> {
        self.messages
            .read()
            .map_err(|e| RepositoryError::connection(format!("lock poisoned: {e}")))
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn find_by_id(&self, id: MessageId) -> RepositoryResult<Option<Message>> {
        let guard = self.read_guard()?;
        Ok(guard.get(&id).cloned())
    }

    async fn count(&self, query: &MessageQuery) -> RepositoryResult<u64> {
        let guard = self.read_guard()?;
        let matching = guard.values().filter(|m| query.matches(m)).count();
        Ok(u64::try_from(matching).unwrap_or(u64::MAX))
    }

    async fn fetch(
        &self,
        query: &MessageQuery,
        window: Option<PageWindow>,
    ) -> RepositoryResult<Vec<Message>> {
        let guard = self.read_guard()?;
        let mut messages: Vec<Message> = guard
            .values()
            .filter(|m| query.matches(m))
            .cloned()
            .collect();
        query.sort(&mut messages);

        let Some(slice) = window else {
            return Ok(messages);
        };
        let offset = usize::try_from(slice.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(slice.limit()).unwrap_or(usize::MAX);
        Ok(messages.into_iter().skip(offset).take(limit).collect())
    }

    async fn commit(&self, changes: PendingChanges) -> RepositoryResult<u64> {
        let mut guard = self
            .messages
            .write()
            .map_err(|e| RepositoryError::connection(format!("lock poisoned: {e}")))?;

        // Validate everything before touching the map so a failed commit
        // leaves the store unchanged.
        for message in changes.inserts() {
            if guard.contains_key(&message.id()) {
                return Err(RepositoryError::DuplicateMessage(message.id()));
            }
        }
        if let Some(missing) = changes.deletes().iter().find(|id| !guard.contains_key(id)) {
            return Err(RepositoryError::NotFound(*missing));
        }

        let (inserts, deletes, read_receipts) = changes.into_parts();
        let mut affected: u64 = 0;

        for message in inserts {
            guard.insert(message.id(), message);
            affected += 1;
        }
        for receipt in read_receipts {
            if let Some(stored) = guard.get_mut(&receipt.id) {
                stored.record_read(receipt.read_at);
                affected += 1;
            }
        }
        for id in deletes {
            if guard.remove(&id).is_some() {
                affected += 1;
            }
        }

        Ok(affected)
    }
}
