//! Diesel row models for message persistence.

use super::schema::{messages, photos};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::message::{
    domain::{Message, MessageId, PersistedMessageData, Username},
    error::RepositoryError,
    ports::RepositoryResult,
};

/// Query result row for message records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Message identifier.
    pub id: Uuid,
    /// Sender username.
    pub sender_username: String,
    /// Recipient username.
    pub recipient_username: String,
    /// Message body.
    pub content: String,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
    /// When the recipient read the message.
    pub read_at: Option<DateTime<Utc>>,
    /// Hidden from the sender.
    pub sender_deleted: bool,
    /// Hidden from the recipient.
    pub recipient_deleted: bool,
}

impl MessageRow {
    /// Converts the row into a domain message.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Serialization`] when a stored username is
    /// blank.
    pub fn into_domain(self) -> RepositoryResult<Message> {
        let Self {
            id,
            sender_username,
            recipient_username,
            content,
            sent_at,
            read_at,
            sender_deleted,
            recipient_deleted,
        } = self;

        Ok(Message::from_persisted(PersistedMessageData {
            id: MessageId::from_uuid(id),
            sender: parse_username(&sender_username)?,
            recipient: parse_username(&recipient_username)?,
            content,
            sent_at,
            read_at,
            sender_deleted,
            recipient_deleted,
        }))
    }
}

/// Insert model for message records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = messages)]
pub struct NewMessageRow {
    /// Message identifier.
    pub id: Uuid,
    /// Sender username.
    pub sender_username: String,
    /// Recipient username.
    pub recipient_username: String,
    /// Message body.
    pub content: String,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
    /// When the recipient read the message.
    pub read_at: Option<DateTime<Utc>>,
    /// Hidden from the sender.
    pub sender_deleted: bool,
    /// Hidden from the recipient.
    pub recipient_deleted: bool,
}

impl From<&Message> for NewMessageRow {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id().into_inner(),
            sender_username: message.sender().as_str().to_owned(),
            recipient_username: message.recipient().as_str().to_owned(),
            content: message.content().to_owned(),
            sent_at: message.sent_at(),
            read_at: message.read_at(),
            sender_deleted: message.sender_deleted(),
            recipient_deleted: message.recipient_deleted(),
        }
    }
}

/// Query result row for profile photos.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = photos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PhotoRow {
    /// Owning username.
    pub username: String,
    /// Public photo URL.
    pub url: String,
    /// Whether this is the owner's main photo.
    pub is_main: bool,
}

pub(super) fn parse_username(value: &str) -> RepositoryResult<Username> {
    Username::new(value)
        .map_err(|e| RepositoryError::serialization(format!("stored username '{value}': {e}")))
}
