//! Domain model for direct messages.
//!
//! Covers the message aggregate, mailbox requests, storage queries
//! described as data, paged results, transport projections and the change
//! set a unit of work commits. Nothing here touches infrastructure.

mod changes;
mod error;
mod ids;
mod mailbox;
mod message;
mod page;
mod query;
mod summary;

pub use changes::{PendingChanges, ReadReceipt};
pub use error::MessageDomainError;
pub use ids::{MessageId, Username};
pub use mailbox::{Container, MailboxQuery, PageRequest};
pub use message::{Message, PersistedMessageData};
pub use page::{Page, PaginationHeader};
pub use query::{MessageFilter, MessageQuery, PageWindow, SentOrder};
pub use summary::{MessageSummary, Photo, ProfileIndex, UserProfile};
