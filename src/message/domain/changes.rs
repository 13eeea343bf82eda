//! Changes staged by a unit of work and committed together.

use super::{Message, MessageId};
use chrono::{DateTime, Utc};

/// Read timestamp to persist for an existing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadReceipt {
    /// Message that was read.
    pub id: MessageId,
    /// When it was read.
    pub read_at: DateTime<Utc>,
}

/// Inserts, deletions and read receipts awaiting a single commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingChanges {
    inserts: Vec<Message>,
    deletes: Vec<MessageId>,
    read_receipts: Vec<ReadReceipt>,
}

impl PendingChanges {
    /// Creates an empty change set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inserts: Vec::new(),
            deletes: Vec::new(),
            read_receipts: Vec::new(),
        }
    }

    /// Stages a message for insertion.
    pub fn insert(&mut self, message: Message) {
        self.inserts.push(message);
    }

    /// Stages a message for removal.
    ///
    /// Removing a message whose insert is still staged drops the insert
    /// instead, so the row never reaches storage.
    pub fn delete(&mut self, id: MessageId) {
        let staged = self.inserts.len();
        self.inserts.retain(|message| message.id() != id);
        if self.inserts.len() != staged {
            return;
        }
        self.read_receipts.retain(|receipt| receipt.id != id);
        if !self.deletes.contains(&id) {
            self.deletes.push(id);
        }
    }

    /// Stages a read timestamp for an existing message.
    ///
    /// A later receipt for the same message replaces an earlier one.
    pub fn mark_read(&mut self, receipt: ReadReceipt) {
        self.read_receipts.retain(|staged| staged.id != receipt.id);
        self.read_receipts.push(receipt);
    }

    /// Returns the staged inserts.
    #[must_use]
    pub fn inserts(&self) -> &[Message] {
        &self.inserts
    }

    /// Returns the staged deletions.
    #[must_use]
    pub fn deletes(&self) -> &[MessageId] {
        &self.deletes
    }

    /// Returns the staged read receipts.
    #[must_use]
    pub fn read_receipts(&self) -> &[ReadReceipt] {
        &self.read_receipts
    }

    /// Returns the staged insert with the given identifier.
    #[must_use]
    pub fn staged_insert(&self, id: MessageId) -> Option<&Message> {
        self.inserts.iter().find(|message| message.id() == id)
    }

    /// Returns the total number of staged changes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inserts.len() + self.deletes.len() + self.read_receipts.len()
    }

    /// Returns `true` when nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits the change set into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Message>, Vec<MessageId>, Vec<ReadReceipt>) {
        (self.inserts, self.deletes, self.read_receipts)
    }
}
