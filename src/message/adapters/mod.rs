//! Persistence adapters for the message module.
//!
//! This module provides concrete implementations of the [`MessageStore`]
//! and [`ProfileDirectory`] ports. Adapters handle all infrastructure
//! concerns while the domain remains pure.
//!
//! # Available Adapters
//!
//! - [`memory`]: thread-safe in-memory storage for tests
//! - [`postgres`]: `PostgreSQL` persistence using Diesel ORM
//!
//! [`MessageStore`]: crate::message::ports::MessageStore
//! [`ProfileDirectory`]: crate::message::ports::ProfileDirectory

pub mod memory;
pub mod postgres;
