//! `PostgreSQL` implementations of the message ports using Diesel ORM.
//!
//! Queries arrive as [`MessageQuery`] data and are translated into boxed
//! Diesel statements, so counting and slicing happen in the database.
//! Commits run inside a single transaction.

mod blocking;
mod models;
mod schema;
mod statements;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

use self::models::{MessageRow, NewMessageRow, PhotoRow, parse_username};
use self::schema::{messages, photos};
use crate::message::{
    domain::{
        Message, MessageId, MessageQuery, PageWindow, PendingChanges, Photo, UserProfile,
        Username,
    },
    error::RepositoryError,
    ports::{MessageStore, ProfileDirectory, RepositoryResult},
};

pub use blocking::PgPool;
use blocking::with_connection;

/// `PostgreSQL` implementation of [`MessageStore`].
///
/// Uses Diesel with r2d2 connection pooling. All database work is moved
/// to tokio's blocking pool.
///
/// # Example
///
/// ```no_run
/// use letterbox::config::DatabaseConfig;
/// use letterbox::message::adapters::postgres::{PostgresMessageStore, PostgresProfileDirectory};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = DatabaseConfig::from_env()?.build_pool()?;
/// let store = PostgresMessageStore::new(pool.clone());
/// let profiles = PostgresProfileDirectory::new(pool);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PostgresMessageStore {
    pool: PgPool,
}

impl PostgresMessageStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl MessageStore for PostgresMessageStore {
    async fn find_by_id(&self, id: MessageId) -> RepositoryResult<Option<Message>> {
        with_connection(&self.pool, move |conn| {
            let row = messages::table
                .find(id.into_inner())
                .select(MessageRow::as_select())
                .first::<MessageRow>(conn)
                .optional()?;
            row.map(MessageRow::into_domain).transpose()
        })
        .await
    }

    async fn count(&self, query: &MessageQuery) -> RepositoryResult<u64> {
        let owned = query.clone();
        with_connection(&self.pool, move |conn| {
            let total: i64 = statements::filtered(&owned).count().get_result(conn)?;
            u64::try_from(total).map_err(|e| RepositoryError::serialization(e.to_string()))
        })
        .await
    }

    async fn fetch(
        &self,
        query: &MessageQuery,
        window: Option<PageWindow>,
    ) -> RepositoryResult<Vec<Message>> {
        let owned = query.clone();
        with_connection(&self.pool, move |conn| {
            let rows = statements::windowed(&owned, window)?
                .select(MessageRow::as_select())
                .load::<MessageRow>(conn)?;
            rows.into_iter().map(MessageRow::into_domain).collect()
        })
        .await
    }

    async fn commit(&self, changes: PendingChanges) -> RepositoryResult<u64> {
        let (inserts, deletes, read_receipts) = changes.into_parts();
        let new_rows: Vec<NewMessageRow> = inserts.iter().map(NewMessageRow::from).collect();
        let insert_ids: Vec<MessageId> = inserts.iter().map(Message::id).collect();

        with_connection(&self.pool, move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                let mut affected: usize = 0;

                if !new_rows.is_empty() {
                    affected += diesel::insert_into(messages::table)
                        .values(&new_rows)
                        .execute(tx)
                        .map_err(|err| map_insert_error(err, &insert_ids))?;
                }

                for receipt in &read_receipts {
                    affected += diesel::update(messages::table.find(receipt.id.into_inner()))
                        .set(messages::read_at.eq(Some(receipt.read_at)))
                        .execute(tx)?;
                }

                for id in &deletes {
                    let removed =
                        diesel::delete(messages::table.find(id.into_inner())).execute(tx)?;
                    if removed == 0 {
                        return Err(RepositoryError::NotFound(*id));
                    }
                    affected += removed;
                }

                Ok(u64::try_from(affected).unwrap_or(u64::MAX))
            })
        })
        .await
    }
}

/// Maps a unique violation on insert to [`RepositoryError::DuplicateMessage`].
///
/// The constraint error does not say which row collided; a single staged
/// insert is reported by ID, larger batches fall back to the raw error.
fn map_insert_error(err: DieselError, ids: &[MessageId]) -> RepositoryError {
    match (&err, ids) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), [id]) => {
            RepositoryError::DuplicateMessage(*id)
        }
        _ => RepositoryError::database(err),
    }
}

/// `PostgreSQL` implementation of [`ProfileDirectory`] backed by the
/// `photos` table.
#[derive(Debug, Clone)]
pub struct PostgresProfileDirectory {
    pool: PgPool,
}

impl PostgresProfileDirectory {
    /// Creates a new directory with the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileDirectory for PostgresProfileDirectory {
    async fn find_profiles(&self, usernames: &[Username]) -> RepositoryResult<Vec<UserProfile>> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }
        let names: Vec<String> = usernames.iter().map(|u| u.as_str().to_owned()).collect();

        with_connection(&self.pool, move |conn| {
            let rows = photos::table
                .filter(photos::username.eq_any(names))
                .order((photos::username.asc(), photos::is_main.desc()))
                .select(PhotoRow::as_select())
                .load::<PhotoRow>(conn)?;
            group_profiles(rows)
        })
        .await
    }
}

/// Folds username-ordered photo rows into one profile per user.
fn group_profiles(rows: Vec<PhotoRow>) -> RepositoryResult<Vec<UserProfile>> {
    let mut profiles: Vec<UserProfile> = Vec::new();
    for row in rows {
        let photo = Photo::new(row.url, row.is_main);
        match profiles.pop() {
            Some(profile) if profile.username().as_str() == row.username => {
                profiles.push(profile.with_photo(photo));
            }
            previous => {
                profiles.extend(previous);
                let username = parse_username(&row.username)?;
                profiles.push(UserProfile::new(username).with_photo(photo));
            }
        }
    }
    Ok(profiles)
}
