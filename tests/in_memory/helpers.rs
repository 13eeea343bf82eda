//! Shared test helpers for in-memory integration tests.

use chrono::{DateTime, Duration, Utc};
use eyre::{Result, WrapErr, eyre};
use letterbox::message::{
    adapters::memory::{InMemoryMessageStore, InMemoryProfileDirectory},
    domain::{Message, MessageId, PersistedMessageData, Photo, UserProfile, Username},
    services::MessageRepository,
};
use mockable::DefaultClock;
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Facade wired to the in-memory adapters.
pub type Repository = MessageRepository<InMemoryMessageStore, InMemoryProfileDirectory, DefaultClock>;

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides a fresh message store for each test.
#[fixture]
pub fn store() -> InMemoryMessageStore {
    InMemoryMessageStore::new()
}

/// Provides a profile directory where every test user has a main photo.
#[fixture]
pub fn profiles() -> InMemoryProfileDirectory {
    let directory = InMemoryProfileDirectory::new();
    for name in ["alice", "bob", "carol"] {
        let username = Username::new(name).expect("valid username");
        let profile = UserProfile::new(username)
            .with_photo(Photo::new(format!("https://img/{name}.png"), true));
        directory.upsert(profile).expect("profile stored");
    }
    directory
}

/// Opens a new unit of work over shared adapters.
pub fn open(store: &InMemoryMessageStore, profiles: &InMemoryProfileDirectory) -> Repository {
    MessageRepository::new(
        Arc::new(store.clone()),
        Arc::new(profiles.clone()),
        Arc::new(DefaultClock),
    )
}

/// Parses a username.
///
/// # Errors
///
/// Returns an error if the name is blank.
pub fn user(name: &str) -> Result<Username> {
    Username::new(name).wrap_err_with(|| format!("invalid username '{name}'"))
}

/// Fixed reference time for seeded messages.
///
/// # Errors
///
/// Returns an error if the timestamp is out of range.
pub fn base_time() -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(1_767_268_800, 0).ok_or_else(|| eyre!("timestamp out of range"))
}

/// Builds an unread stored message sent `minutes` after [`base_time`].
///
/// # Errors
///
/// Returns an error if a username or the timestamp is invalid.
pub fn seeded(sender: &str, recipient: &str, minutes: i64) -> Result<Message> {
    Ok(Message::from_persisted(PersistedMessageData {
        id: MessageId::new(),
        sender: user(sender)?,
        recipient: user(recipient)?,
        content: format!("{sender} -> {recipient} #{minutes}"),
        sent_at: base_time()? + Duration::minutes(minutes),
        read_at: None,
        sender_deleted: false,
        recipient_deleted: false,
    }))
}

/// Builds a stored message with explicit deletion flags.
///
/// # Errors
///
/// Returns an error if a username or the timestamp is invalid.
pub fn seeded_hidden(
    sender: &str,
    recipient: &str,
    minutes: i64,
    sender_deleted: bool,
    recipient_deleted: bool,
) -> Result<Message> {
    let message = seeded(sender, recipient, minutes)?;
    Ok(Message::from_persisted(PersistedMessageData {
        id: message.id(),
        sender: message.sender().clone(),
        recipient: message.recipient().clone(),
        content: message.content().to_owned(),
        sent_at: message.sent_at(),
        read_at: None,
        sender_deleted,
        recipient_deleted,
    }))
}

/// Composes a new message stamped with the current time.
///
/// # Errors
///
/// Returns an error if the message is invalid.
pub fn compose(sender: &str, recipient: &str, content: &str) -> Result<Message> {
    Message::compose(user(sender)?, user(recipient)?, content, &DefaultClock)
        .wrap_err("compose message")
}

/// Stages `messages` on a fresh unit of work and commits them.
///
/// # Errors
///
/// Returns an error if the commit fails.
pub fn seed(
    rt: &Runtime,
    store: &InMemoryMessageStore,
    profiles: &InMemoryProfileDirectory,
    messages: impl IntoIterator<Item = Message>,
) -> Result<()> {
    let mut repo = open(store, profiles);
    for message in messages {
        repo.add_message(message);
    }
    rt.block_on(repo.save_changes()).wrap_err("seed commit")?;
    Ok(())
}
