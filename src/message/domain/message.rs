//! Message aggregate and its read-receipt transition.

use super::{MessageDomainError, MessageId, Username};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A direct message between two users.
///
/// Each side of the conversation hides the message independently through
/// its own deletion flag. The only in-place mutation is the read receipt,
/// set once by [`Message::mark_read`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    sender: Username,
    recipient: Username,
    content: String,
    sent_at: DateTime<Utc>,
    read_at: Option<DateTime<Utc>>,
    sender_deleted: bool,
    recipient_deleted: bool,
}

/// Parameter object for reconstructing a persisted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedMessageData {
    /// Persisted message identifier.
    pub id: MessageId,
    /// Persisted sender username.
    pub sender: Username,
    /// Persisted recipient username.
    pub recipient: Username,
    /// Persisted message body.
    pub content: String,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
    /// When the recipient read the message, if ever.
    pub read_at: Option<DateTime<Utc>>,
    /// Whether the sender has hidden the message.
    pub sender_deleted: bool,
    /// Whether the recipient has hidden the message.
    pub recipient_deleted: bool,
}

impl Message {
    /// Composes a new unsent message stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::SelfAddressed`] when sender and
    /// recipient are the same user, or [`MessageDomainError::EmptyContent`]
    /// when the body is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use letterbox::message::domain::{Message, Username};
    /// use mockable::DefaultClock;
    ///
    /// let alice = Username::new("alice").expect("valid username");
    /// let bob = Username::new("bob").expect("valid username");
    /// let message = Message::compose(alice, bob, "hi", &DefaultClock).expect("valid message");
    /// assert!(message.read_at().is_none());
    /// ```
    pub fn compose(
        sender: Username,
        recipient: Username,
        content: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, MessageDomainError> {
        if sender == recipient {
            return Err(MessageDomainError::SelfAddressed);
        }
        let body = content.into();
        if body.trim().is_empty() {
            return Err(MessageDomainError::EmptyContent);
        }

        Ok(Self {
            id: MessageId::new(),
            sender,
            recipient,
            content: body,
            sent_at: clock.utc(),
            read_at: None,
            sender_deleted: false,
            recipient_deleted: false,
        })
    }

    /// Reconstructs a message from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedMessageData) -> Self {
        Self {
            id: data.id,
            sender: data.sender,
            recipient: data.recipient,
            content: data.content,
            sent_at: data.sent_at,
            read_at: data.read_at,
            sender_deleted: data.sender_deleted,
            recipient_deleted: data.recipient_deleted,
        }
    }

    /// Returns the message identifier.
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the sender username.
    #[must_use]
    pub const fn sender(&self) -> &Username {
        &self.sender
    }

    /// Returns the recipient username.
    #[must_use]
    pub const fn recipient(&self) -> &Username {
        &self.recipient
    }

    /// Returns the message body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the message was sent.
    #[must_use]
    pub const fn sent_at(&self) -> DateTime<Utc> {
        self.sent_at
    }

    /// Returns when the recipient read the message, if they have.
    #[must_use]
    pub const fn read_at(&self) -> Option<DateTime<Utc>> {
        self.read_at
    }

    /// Returns `true` when the sender has hidden the message.
    #[must_use]
    pub const fn sender_deleted(&self) -> bool {
        self.sender_deleted
    }

    /// Returns `true` when the recipient has hidden the message.
    #[must_use]
    pub const fn recipient_deleted(&self) -> bool {
        self.recipient_deleted
    }

    /// Returns `true` when `username` received this message and has not
    /// read it yet.
    #[must_use]
    pub fn is_unread_by(&self, username: &Username) -> bool {
        self.read_at.is_none() && &self.recipient == username
    }

    /// Applies a read receipt that has already been decided, replacing any
    /// earlier timestamp.
    pub(crate) const fn record_read(&mut self, read_at: DateTime<Utc>) {
        self.read_at = Some(read_at);
    }

    /// Stamps the read receipt with the current time.
    ///
    /// Returns `false` without touching the timestamp when the message was
    /// already read.
    pub fn mark_read(&mut self, clock: &impl Clock) -> bool {
        if self.read_at.is_some() {
            return false;
        }
        self.read_at = Some(clock.utc());
        true
    }
}
