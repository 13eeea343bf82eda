//! Direct messages between users of a web application.
//!
//! This module stages message inserts and deletions, looks up single
//! messages, pages a user's inbox, outbox or unread messages, and returns
//! conversation threads while recording read receipts.
//!
//! # Architecture
//!
//! The module follows hexagonal architecture principles:
//!
//! - **Domain**: Pure domain types ([`domain::Message`], [`domain::MailboxQuery`], [`domain::Page`], etc.)
//! - **Ports**: Abstract trait interfaces ([`ports::MessageStore`], [`ports::ProfileDirectory`])
//! - **Adapters**: Concrete implementations ([`adapters::memory::InMemoryMessageStore`], [`adapters::postgres::PostgresMessageStore`])
//! - **Services**: The unit of work callers use ([`services::MessageRepository`])
//!
//! # Example
//!
//! ```
//! use letterbox::message::domain::{Container, MailboxQuery, MessageQuery, PageRequest, Username};
//!
//! let alice = Username::new("alice").expect("valid username");
//! let request = MailboxQuery::new(alice)
//!     .with_container(Container::parse("Inbox"))
//!     .with_page(PageRequest::new(1, 20).expect("valid page"));
//! let query = MessageQuery::mailbox(&request);
//! assert_eq!(request.container(), Container::Inbox);
//! assert_eq!(query.filter(), &letterbox::message::domain::MessageFilter::Inbox(request.username().clone()));
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
