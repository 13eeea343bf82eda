//! Port trait definitions for the message subsystem.
//!
//! Ports define the abstract interfaces the message services require from
//! infrastructure. Adapters implement them for in-memory storage and
//! `PostgreSQL`.

pub mod profiles;
pub mod store;

pub use profiles::ProfileDirectory;
pub use store::{MessageStore, RepositoryResult};
