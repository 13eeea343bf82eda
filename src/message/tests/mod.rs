//! Unit tests for the message module.
//!
//! Tests are organised by concept: domain values first, then the in-memory
//! adapters, then the unit-of-work facade.
