//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit and integration tests without database dependencies.

mod profiles;
mod store;

pub use profiles::InMemoryProfileDirectory;
pub use store::InMemoryMessageStore;
