//! Storage queries described as data.
//!
//! A [`MessageQuery`] pairs one [`MessageFilter`] with a [`SentOrder`].
//! Adapters either evaluate it in process ([`MessageQuery::matches`] and
//! [`MessageQuery::sort`]) or translate it into their own query language, so
//! nothing is materialised before the count and slice are requested.

use super::{Container, MailboxQuery, Message, PageRequest, Username};
use std::cmp::Ordering;

/// Row predicate applied before ordering and slicing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageFilter {
    /// Received by the user and not hidden by them.
    Inbox(Username),
    /// Sent by the user and not hidden by them.
    Outbox(Username),
    /// Received by the user, not hidden by them, and not yet read.
    UnreadInbox(Username),
    /// Messages between two users that `current` can still see.
    Thread {
        /// User viewing the conversation.
        current: Username,
        /// Other participant.
        other: Username,
    },
}

impl MessageFilter {
    /// Returns `true` when the message satisfies the predicate.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        match self {
            Self::Inbox(username) => {
                message.recipient() == username && !message.recipient_deleted()
            }
            Self::Outbox(username) => message.sender() == username && !message.sender_deleted(),
            Self::UnreadInbox(username) => {
                message.recipient() == username
                    && !message.recipient_deleted()
                    && message.read_at().is_none()
            }
            Self::Thread { current, other } => {
                let received = message.recipient() == current
                    && message.sender() == other
                    && !message.recipient_deleted();
                let sent = message.recipient() == other
                    && message.sender() == current
                    && !message.sender_deleted();
                received || sent
            }
        }
    }
}

/// Ordering by sent timestamp; ties fall back to the message identifier in
/// the same direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentOrder {
    /// Most recent first.
    NewestFirst,
    /// Oldest first.
    OldestFirst,
}

impl SentOrder {
    /// Compares two messages under this ordering.
    #[must_use]
    pub fn compare(self, left: &Message, right: &Message) -> Ordering {
        let ascending = left
            .sent_at()
            .cmp(&right.sent_at())
            .then_with(|| left.id().cmp(&right.id()));
        match self {
            Self::NewestFirst => ascending.reverse(),
            Self::OldestFirst => ascending,
        }
    }
}

/// Filter and ordering handed to storage as one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageQuery {
    filter: MessageFilter,
    order: SentOrder,
}

impl MessageQuery {
    /// Creates a query from its parts.
    #[must_use]
    pub const fn new(filter: MessageFilter, order: SentOrder) -> Self {
        Self { filter, order }
    }

    /// Builds the newest-first query for a mailbox view.
    #[must_use]
    pub fn mailbox(request: &MailboxQuery) -> Self {
        let username = request.username().clone();
        let filter = match request.container() {
            Container::Inbox => MessageFilter::Inbox(username),
            Container::Outbox => MessageFilter::Outbox(username),
            Container::Unread => MessageFilter::UnreadInbox(username),
        };
        Self::new(filter, SentOrder::NewestFirst)
    }

    /// Builds the oldest-first query for the conversation `current` sees
    /// with `other`.
    #[must_use]
    pub fn thread(current: &Username, other: &Username) -> Self {
        Self::new(
            MessageFilter::Thread {
                current: current.clone(),
                other: other.clone(),
            },
            SentOrder::OldestFirst,
        )
    }

    /// Returns the row predicate.
    #[must_use]
    pub const fn filter(&self) -> &MessageFilter {
        &self.filter
    }

    /// Returns the ordering.
    #[must_use]
    pub const fn order(&self) -> SentOrder {
        self.order
    }

    /// Returns `true` when the message satisfies the filter.
    #[must_use]
    pub fn matches(&self, message: &Message) -> bool {
        self.filter.matches(message)
    }

    /// Sorts messages in place under this query's ordering.
    pub fn sort(&self, messages: &mut [Message]) {
        messages.sort_by(|left, right| self.order.compare(left, right));
    }
}

/// Contiguous slice of an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    offset: u64,
    limit: u64,
}

impl PageWindow {
    /// Creates a window of at most `limit` rows after skipping `offset`.
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Returns the number of rows skipped.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns the maximum number of rows returned.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}

impl From<PageRequest> for PageWindow {
    fn from(page: PageRequest) -> Self {
        Self::new(page.offset(), u64::from(page.page_size()))
    }
}
