//! Profile lookup port feeding the message summary projection.

use super::store::RepositoryResult;
use crate::message::domain::{UserProfile, Username};
use async_trait::async_trait;

/// Source of participant profiles (username and photo collection).
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Returns the profiles of the given users.
    ///
    /// Unknown usernames are omitted from the result rather than reported.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the lookup fails.
    async fn find_profiles(&self, usernames: &[Username]) -> RepositoryResult<Vec<UserProfile>>;
}
