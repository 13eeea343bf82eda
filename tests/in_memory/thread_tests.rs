//! Conversation thread tests, including read-receipt persistence.

use crate::in_memory::helpers::{
    compose, open, profiles, runtime, seed, seeded, seeded_hidden, store, user,
};
use eyre::{Result, eyre};
use letterbox::message::{
    adapters::memory::{InMemoryMessageStore, InMemoryProfileDirectory},
    domain::{Container, MailboxQuery},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

/// The thread holds both directions of the conversation, oldest first.
#[rstest]
fn thread_is_oldest_first_in_both_directions(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    let first = seeded("bob", "alice", 1)?;
    let second = seeded("alice", "bob", 2)?;
    let third = seeded("bob", "alice", 3)?;
    let unrelated = seeded("carol", "alice", 4)?;
    seed(
        &rt,
        &store,
        &profiles,
        [third.clone(), unrelated, first.clone(), second.clone()],
    )?;

    let mut repo = open(&store, &profiles);
    let thread = rt.block_on(repo.fetch_thread_and_mark_read(&user("alice")?, &user("bob")?))?;

    let ids: Vec<_> = thread.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![first.id(), second.id(), third.id()]);
    Ok(())
}

/// Incoming unread messages are marked read and the receipts are persisted;
/// outgoing messages are left alone.
#[rstest]
fn reading_a_thread_persists_read_receipts(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    let incoming = seeded("bob", "alice", 1)?;
    let outgoing = seeded("alice", "bob", 2)?;
    seed(&rt, &store, &profiles, [incoming.clone(), outgoing.clone()])?;

    let mut repo = open(&store, &profiles);
    let thread = rt.block_on(repo.fetch_thread_and_mark_read(&user("alice")?, &user("bob")?))?;
    assert!(thread.first().and_then(|s| s.read_at).is_some());
    assert!(!repo.has_pending_changes());

    let fresh = open(&store, &profiles);
    let stored_in = rt
        .block_on(fresh.get_message(incoming.id()))?
        .ok_or_else(|| eyre!("incoming message missing"))?;
    let stored_out = rt
        .block_on(fresh.get_message(outgoing.id()))?
        .ok_or_else(|| eyre!("outgoing message missing"))?;
    assert_eq!(stored_in.read_at(), thread.first().and_then(|s| s.read_at));
    assert!(stored_out.read_at().is_none());

    let unread = rt.block_on(fresh.get_messages_for_user(&MailboxQuery::new(user("alice")?)))?;
    assert!(unread.is_empty());
    Ok(())
}

/// The other participant reading the same thread does not touch messages
/// they sent.
#[rstest]
fn sender_reading_thread_leaves_message_unread(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    let message = seeded("alice", "bob", 1)?;
    seed(&rt, &store, &profiles, [message.clone()])?;

    let mut repo = open(&store, &profiles);
    let thread = rt.block_on(repo.fetch_thread_and_mark_read(&user("alice")?, &user("bob")?))?;

    assert_eq!(thread.len(), 1);
    assert!(thread.iter().all(|s| s.read_at.is_none()));
    let inbox = MailboxQuery::new(user("bob")?).with_container(Container::Unread);
    let page = rt.block_on(repo.get_messages_for_user(&inbox))?;
    assert_eq!(page.total_count(), 1);
    Ok(())
}

/// Messages hidden by the viewer drop out of their thread but stay visible
/// to the other participant.
#[rstest]
fn deletion_flags_are_per_participant(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    seed(
        &rt,
        &store,
        &profiles,
        [
            seeded_hidden("bob", "alice", 1, false, true)?,
            seeded("alice", "bob", 2)?,
        ],
    )?;

    let mut repo = open(&store, &profiles);
    let alice_view =
        rt.block_on(repo.fetch_thread_and_mark_read(&user("alice")?, &user("bob")?))?;
    let bob_view = rt.block_on(repo.fetch_thread_and_mark_read(&user("bob")?, &user("alice")?))?;

    assert_eq!(alice_view.len(), 1);
    assert_eq!(bob_view.len(), 2);
    Ok(())
}

/// Reading a thread commits unrelated staged work in the same step.
#[rstest]
fn thread_read_flushes_staged_messages(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    seed(&rt, &store, &profiles, [seeded("bob", "alice", 1)?])?;

    let mut repo = open(&store, &profiles);
    repo.add_message(compose("alice", "carol", "see you soon")?);
    rt.block_on(repo.fetch_thread_and_mark_read(&user("alice")?, &user("bob")?))?;

    assert!(!repo.has_pending_changes());
    assert_eq!(store.len(), 2);
    Ok(())
}

/// A second read of the same thread finds nothing left to mark.
#[rstest]
fn second_thread_read_finds_nothing_unread(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    seed(
        &rt,
        &store,
        &profiles,
        [seeded("bob", "alice", 1)?, seeded("bob", "alice", 2)?],
    )?;

    let mut repo = open(&store, &profiles);
    let first = rt.block_on(repo.fetch_thread_and_mark_read(&user("alice")?, &user("bob")?))?;
    let second = rt.block_on(repo.fetch_thread_and_mark_read(&user("alice")?, &user("bob")?))?;

    assert!(second.iter().all(|s| s.read_at.is_some()));
    let first_reads: Vec<_> = first.iter().map(|s| s.read_at).collect();
    let second_reads: Vec<_> = second.iter().map(|s| s.read_at).collect();
    assert_eq!(first_reads, second_reads);
    assert!(!rt.block_on(repo.save_changes())?);
    Ok(())
}

/// Without deletions both participants see the same messages in the same
/// order.
#[rstest]
fn thread_contents_are_symmetric(
    runtime: io::Result<Runtime>,
    store: InMemoryMessageStore,
    profiles: InMemoryProfileDirectory,
) -> Result<()> {
    let rt = runtime?;
    seed(
        &rt,
        &store,
        &profiles,
        [
            seeded("alice", "bob", 1)?,
            seeded("bob", "alice", 2)?,
            seeded("alice", "bob", 3)?,
        ],
    )?;

    let mut repo = open(&store, &profiles);
    let alice_view = rt.block_on(repo.fetch_thread_and_mark_read(&user("alice")?, &user("bob")?))?;
    let bob_view = rt.block_on(repo.fetch_thread_and_mark_read(&user("bob")?, &user("alice")?))?;

    let alice_ids: Vec<_> = alice_view.iter().map(|s| s.id).collect();
    let bob_ids: Vec<_> = bob_view.iter().map(|s| s.id).collect();
    assert_eq!(alice_ids, bob_ids);
    Ok(())
}
