//! Message store facade: a unit of work over the message ports.
//!
//! Inserts and deletions are staged in memory and written by
//! [`MessageRepository::save_changes`]. Reads go to the store directly;
//! only [`MessageRepository::fetch_thread_and_mark_read`] writes as part of
//! a read, committing the read receipts it produces before returning.

use crate::message::{
    domain::{
        MailboxQuery, Message, MessageId, MessageQuery, MessageSummary, Page, PageWindow,
        PendingChanges, ProfileIndex, ReadReceipt, Username,
    },
    ports::{MessageStore, ProfileDirectory, RepositoryResult},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Unit of work for direct messages.
///
/// One instance serves one request. Staging methods take `&mut self`, so a
/// single unit of work cannot be shared between concurrent callers; the
/// underlying ports can.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use letterbox::message::adapters::memory::{InMemoryMessageStore, InMemoryProfileDirectory};
/// use letterbox::message::domain::{Message, Username};
/// use letterbox::message::services::MessageRepository;
/// use mockable::DefaultClock;
///
/// let runtime = tokio::runtime::Builder::new_current_thread()
///     .enable_all()
///     .build()
///     .expect("runtime");
/// runtime.block_on(async {
///     let mut repo = MessageRepository::new(
///         Arc::new(InMemoryMessageStore::new()),
///         Arc::new(InMemoryProfileDirectory::new()),
///         Arc::new(DefaultClock),
///     );
///     let alice = Username::new("alice").expect("valid username");
///     let bob = Username::new("bob").expect("valid username");
///     let message = Message::compose(alice, bob, "hello", &DefaultClock).expect("valid message");
///
///     repo.add_message(message);
///     assert!(repo.save_changes().await.expect("commit succeeds"));
/// });
/// ```
pub struct MessageRepository<S, P, C>
where
    S: MessageStore,
    P: ProfileDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    profiles: Arc<P>,
    clock: Arc<C>,
    pending: PendingChanges,
}

impl<S, P, C> MessageRepository<S, P, C>
where
    S: MessageStore,
    P: ProfileDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a unit of work with nothing staged.
    #[must_use]
    pub const fn new(store: Arc<S>, profiles: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            store,
            profiles,
            clock,
            pending: PendingChanges::new(),
        }
    }

    /// Stages a new message for insertion on the next commit.
    pub fn add_message(&mut self, message: Message) {
        debug!(message_id = %message.id(), "staging message insert");
        self.pending.insert(message);
    }

    /// Stages removal of a message on the next commit.
    ///
    /// If the message's insert is still staged, the insert is dropped
    /// instead.
    pub fn delete_message(&mut self, message: &Message) {
        debug!(message_id = %message.id(), "staging message delete");
        self.pending.delete(message.id());
    }

    /// Looks up a single message, including messages staged for insert.
    ///
    /// Returns `Ok(None)` when no such message exists.
    ///
    /// # Errors
    ///
    /// Propagates any store failure unchanged.
    #[instrument(skip(self))]
    pub async fn get_message(&self, id: MessageId) -> RepositoryResult<Option<Message>> {
        if let Some(staged) = self.pending.staged_insert(id) {
            return Ok(Some(staged.clone()));
        }
        self.store.find_by_id(id).await
    }

    /// Returns one page of the requested mailbox, newest first.
    ///
    /// The total count covers the whole filtered mailbox; a page past the end
    /// is empty rather than an error.
    ///
    /// # Errors
    ///
    /// Propagates any store or profile lookup failure unchanged.
    #[instrument(
        skip_all,
        fields(
            username = %request.username(),
            container = request.container().as_str(),
            page = request.page().page_number(),
        )
    )]
    pub async fn get_messages_for_user(
        &self,
        request: &MailboxQuery,
    ) -> RepositoryResult<Page<MessageSummary>> {
        let query = MessageQuery::mailbox(request);
        let page = request.page();

        let total = self.store.count(&query).await?;
        let messages = self.store.fetch(&query, Some(PageWindow::from(page))).await?;
        let profiles = self.load_profiles(&messages).await?;

        debug!(total, returned = messages.len(), "loaded mailbox page");
        let items = messages
            .iter()
            .map(|message| MessageSummary::project(message, &profiles))
            .collect();
        Ok(Page::new(items, total, page))
    }

    /// Returns the whole conversation between `current` and `other`, oldest
    /// first, after marking every unread message addressed to `current` as
    /// read.
    ///
    /// When anything was marked, all staged changes are committed before the
    /// thread is returned, and the returned summaries carry the new read
    /// timestamps.
    ///
    /// # Errors
    ///
    /// Propagates any store, commit or profile lookup failure unchanged.
    #[instrument(skip_all, fields(current = %current, other = %other))]
    pub async fn fetch_thread_and_mark_read(
        &mut self,
        current: &Username,
        other: &Username,
    ) -> RepositoryResult<Vec<MessageSummary>> {
        let query = MessageQuery::thread(current, other);
        let mut messages = self.store.fetch(&query, None).await?;

        let mut marked: usize = 0;
        for message in &mut messages {
            if !message.is_unread_by(current) || !message.mark_read(&*self.clock) {
                continue;
            }
            if let Some(read_at) = message.read_at() {
                self.pending.mark_read(ReadReceipt {
                    id: message.id(),
                    read_at,
                });
                marked += 1;
            }
        }

        if marked > 0 {
            debug!(marked, "marking thread messages as read");
            self.save_changes().await?;
        }

        let profiles = self.load_profiles(&messages).await?;
        Ok(messages
            .iter()
            .map(|message| MessageSummary::project(message, &profiles))
            .collect())
    }

    /// Commits every staged change in one atomic step.
    ///
    /// Returns `true` when at least one row changed and `false` when
    /// nothing was staged. Staged changes survive a failed commit.
    ///
    /// # Errors
    ///
    /// Propagates the store's commit failure unchanged.
    #[instrument(skip(self), fields(staged = self.pending.len()))]
    pub async fn save_changes(&mut self) -> RepositoryResult<bool> {
        if self.pending.is_empty() {
            debug!("no staged changes to commit");
            return Ok(false);
        }

        let affected = self.store.commit(self.pending.clone()).await?;
        self.pending = PendingChanges::new();
        debug!(affected, "committed staged changes");
        Ok(affected > 0)
    }

    /// Returns `true` when changes are waiting for [`Self::save_changes`].
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Returns the changes staged so far.
    #[must_use]
    pub const fn pending_changes(&self) -> &PendingChanges {
        &self.pending
    }

    async fn load_profiles(&self, messages: &[Message]) -> RepositoryResult<ProfileIndex> {
        let mut usernames: Vec<Username> = messages
            .iter()
            .flat_map(|message| [message.sender().clone(), message.recipient().clone()])
            .collect();
        usernames.sort();
        usernames.dedup();
        if usernames.is_empty() {
            return Ok(ProfileIndex::default());
        }

        let profiles = self.profiles.find_profiles(&usernames).await?;
        Ok(profiles.into_iter().collect())
    }
}
