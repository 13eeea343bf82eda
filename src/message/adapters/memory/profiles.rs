//! In-memory profile directory for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::message::{
    domain::{UserProfile, Username},
    error::RepositoryError,
    ports::{ProfileDirectory, RepositoryResult},
};

/// Thread-safe in-memory profile directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileDirectory {
    profiles: Arc<RwLock<HashMap<Username, UserProfile>>>,
}

impl InMemoryProfileDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a profile.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Connection`] if the internal lock is
    /// poisoned.
    pub fn upsert(&self, profile: UserProfile) -> RepositoryResult<()> {
        let mut guard = self
            .profiles
            .write()
            .map_err(|e| RepositoryError::connection(format!("lock poisoned: {e}")))?;
        guard.insert(profile.username().clone(), profile);
        Ok(())
    }
}

#[async_trait]
impl ProfileDirectory for InMemoryProfileDirectory {
    async fn find_profiles(&self, usernames: &[Username]) -> RepositoryResult<Vec<UserProfile>> {
        let guard = self
            .profiles
            .read()
            .map_err(|e| RepositoryError::connection(format!("lock poisoned: {e}")))?;
        Ok(usernames
            .iter()
            .filter_map(|username| guard.get(username).cloned())
            .collect())
    }
}
