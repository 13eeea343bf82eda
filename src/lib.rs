//! Letterbox: message storage for a web application's direct messaging.
//!
//! This crate provides the data-access layer behind a messaging feature:
//! staging and committing messages, paging a user's mailbox, and reading
//! conversation threads with read receipts.
//!
//! # Architecture
//!
//! Letterbox follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`message`]: Message model, storage ports, adapters and the unit of work
//! - [`config`]: Database settings read from the environment

pub mod config;
pub mod message;
