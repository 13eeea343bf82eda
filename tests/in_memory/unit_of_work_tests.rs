//! Staging and commit tests for the message unit of work.

use crate::in_memory::helpers::{compose, open, profiles, runtime, seed, seeded, store};
use eyre::{Result, eyre};
use letterbox::message::{
    adapters::memory::{InMemoryMessageStore, InMemoryProfileDirectory},
    error::RepositoryError,
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// Staged messages reach storage only on save.
#[rstest]
fn add_is_invisible_to_other_units_until_saved(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    let message = compose("alice", "bob", "hello")?;
    let mut writer = open(&store, &profiles);
    let reader = open(&store, &profiles);

    writer.add_message(message.clone());
    assert!(rt.block_on(reader.get_message(message.id()))?.is_none());
    assert!(rt.block_on(writer.get_message(message.id()))?.is_some());

    assert!(rt.block_on(writer.save_changes())?);
    let stored = rt
        .block_on(reader.get_message(message.id()))?
        .ok_or_else(|| eyre!("message missing after save"))?;
    assert_eq!(stored, message);
    Ok(())
}

/// Saving with nothing staged reports no changes.
#[rstest]
fn save_without_changes_returns_false(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    let mut repo = open(&store, &profiles);

    assert!(!rt.block_on(repo.save_changes())?);
    Ok(())
}

/// Deleting a stored message removes it once saved.
#[rstest]
fn delete_removes_message_on_save(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    let message = seeded("alice", "bob", 1)?;
    seed(&rt, &store, &profiles, [message.clone()])?;

    let mut repo = open(&store, &profiles);
    repo.delete_message(&message);
    assert_eq!(store.len(), 1);

    assert!(rt.block_on(repo.save_changes())?);
    assert!(store.is_empty());
    Ok(())
}

/// Adding and then deleting before a save leaves storage untouched.
#[rstest]
fn delete_cancels_staged_add(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    let message = compose("alice", "bob", "never mind")?;
    let mut repo = open(&store, &profiles);

    repo.add_message(message.clone());
    repo.delete_message(&message);

    assert!(!rt.block_on(repo.save_changes())?);
    assert!(store.is_empty());
    Ok(())
}

/// A failing commit applies none of the staged changes and keeps them for
/// another attempt.
#[rstest]
fn failed_save_is_atomic(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    let existing = seeded("alice", "bob", 1)?;
    seed(&rt, &store, &profiles, [existing.clone()])?;

    let mut repo = open(&store, &profiles);
    let fresh = compose("bob", "alice", "reply")?;
    repo.add_message(fresh.clone());
    repo.add_message(existing.clone());

    let result = rt.block_on(repo.save_changes());

    assert!(matches!(result, Err(RepositoryError::DuplicateMessage(id)) if id == existing.id()));
    assert_eq!(store.len(), 1);
    assert!(repo.has_pending_changes());
    assert_eq!(repo.pending_changes().inserts().len(), 2);
    Ok(())
}

/// Deleting a message another unit of work already removed fails the
/// commit.
#[rstest]
fn stale_delete_fails_commit(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    let message = seeded("alice", "bob", 1)?;
    seed(&rt, &store, &profiles, [message.clone()])?;

    let mut first = open(&store, &profiles);
    let mut second = open(&store, &profiles);
    first.delete_message(&message);
    second.delete_message(&message);

    assert!(rt.block_on(first.save_changes())?);
    let result = rt.block_on(second.save_changes());

    assert!(matches!(result, Err(RepositoryError::NotFound(id)) if id == message.id()));
    Ok(())
}
