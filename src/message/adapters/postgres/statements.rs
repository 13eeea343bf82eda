//! Translation of [`MessageQuery`] values into boxed Diesel queries.

use diesel::pg::Pg;
use diesel::prelude::*;

use super::schema::messages;
use crate::message::domain::{MessageFilter, MessageQuery, PageWindow, SentOrder};
use crate::message::{error::RepositoryError, ports::RepositoryResult};

/// Boxed `messages` query borrowing its bind values from a [`MessageQuery`].
pub(super) type BoxedMessageQuery<'a> = messages::BoxedQuery<'a, Pg>;

/// Applies the query's filter to the `messages` table.
pub(super) fn filtered(query: &MessageQuery) -> BoxedMessageQuery<'_> {
    let base = messages::table.into_boxed();
    match query.filter() {
        MessageFilter::Inbox(username) => base
            .filter(messages::recipient_username.eq(username.as_str()))
            .filter(messages::recipient_deleted.eq(false)),
        MessageFilter::Outbox(username) => base
            .filter(messages::sender_username.eq(username.as_str()))
            .filter(messages::sender_deleted.eq(false)),
        MessageFilter::UnreadInbox(username) => base
            .filter(messages::recipient_username.eq(username.as_str()))
            .filter(messages::recipient_deleted.eq(false))
            .filter(messages::read_at.is_null()),
        MessageFilter::Thread { current, other } => base.filter(
            messages::recipient_username
                .eq(current.as_str())
                .and(messages::sender_username.eq(other.as_str()))
                .and(messages::recipient_deleted.eq(false))
                .or(messages::recipient_username
                    .eq(other.as_str())
                    .and(messages::sender_username.eq(current.as_str()))
                    .and(messages::sender_deleted.eq(false))),
        ),
    }
}

/// Applies the query's filter and ordering.
pub(super) fn ordered(query: &MessageQuery) -> BoxedMessageQuery<'_> {
    let rows = filtered(query);
    match query.order() {
        SentOrder::NewestFirst => rows.order((messages::sent_at.desc(), messages::id.desc())),
        SentOrder::OldestFirst => rows.order((messages::sent_at.asc(), messages::id.asc())),
    }
}

/// Applies filter, ordering and the optional slice.
pub(super) fn windowed(
    query: &MessageQuery,
    window: Option<PageWindow>,
) -> RepositoryResult<BoxedMessageQuery<'_>> {
    let rows = ordered(query);
    let Some(slice) = window else {
        return Ok(rows);
    };
    let offset = i64::try_from(slice.offset())
        .map_err(|e| RepositoryError::serialization(format!("page offset: {e}")))?;
    let limit = i64::try_from(slice.limit())
        .map_err(|e| RepositoryError::serialization(format!("page limit: {e}")))?;
    Ok(rows.offset(offset).limit(limit))
}
