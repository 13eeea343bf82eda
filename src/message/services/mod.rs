//! Application services for the message subsystem.
//!
//! Services coordinate the domain with the store and profile ports.

mod repository;

pub use repository::MessageRepository;
