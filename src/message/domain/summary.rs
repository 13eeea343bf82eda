//! Transport-facing message projection and the profile data it draws on.

use super::{Message, MessageId, Username};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A stored photo of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    url: String,
    is_main: bool,
}

impl Photo {
    /// Creates a photo reference.
    #[must_use]
    pub fn new(url: impl Into<String>, is_main: bool) -> Self {
        Self {
            url: url.into(),
            is_main,
        }
    }

    /// Returns the photo URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns `true` for the user's main photo.
    #[must_use]
    pub const fn is_main(&self) -> bool {
        self.is_main
    }
}

/// Public profile data of a message participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    username: Username,
    photos: Vec<Photo>,
}

impl UserProfile {
    /// Creates a profile without photos.
    #[must_use]
    pub const fn new(username: Username) -> Self {
        Self {
            username,
            photos: Vec::new(),
        }
    }

    /// Adds a photo to the profile.
    #[must_use]
    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photos.push(photo);
        self
    }

    /// Returns the profile's username.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns every photo on the profile.
    #[must_use]
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Returns the URL of the first photo flagged as main.
    #[must_use]
    pub fn main_photo_url(&self) -> Option<&str> {
        self.photos
            .iter()
            .find(|photo| photo.is_main())
            .map(Photo::url)
    }
}

/// Profiles keyed by username for projection lookups.
#[derive(Debug, Clone, Default)]
pub struct ProfileIndex {
    profiles: HashMap<Username, UserProfile>,
}

impl ProfileIndex {
    /// Returns the main photo URL for `username`, if the profile has one.
    #[must_use]
    pub fn main_photo_url(&self, username: &Username) -> Option<&str> {
        self.profiles
            .get(username)
            .and_then(UserProfile::main_photo_url)
    }

    /// Returns the number of indexed profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Returns `true` when no profiles are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl FromIterator<UserProfile> for ProfileIndex {
    fn from_iter<I: IntoIterator<Item = UserProfile>>(iter: I) -> Self {
        Self {
            profiles: iter
                .into_iter()
                .map(|profile| (profile.username().clone(), profile))
                .collect(),
        }
    }
}

/// Lightweight view of a message for mailbox and thread responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    /// Message identifier.
    pub id: MessageId,
    /// Sender username.
    pub sender_username: Username,
    /// Sender's main photo, if any.
    pub sender_photo_url: Option<String>,
    /// Recipient username.
    pub recipient_username: Username,
    /// Recipient's main photo, if any.
    pub recipient_photo_url: Option<String>,
    /// Message body.
    pub content: String,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
    /// When the recipient read the message, if ever.
    pub read_at: Option<DateTime<Utc>>,
}

impl MessageSummary {
    /// Projects a message using participant profiles from `profiles`.
    ///
    /// Participants missing from the index get no photo URL.
    #[must_use]
    pub fn project(message: &Message, profiles: &ProfileIndex) -> Self {
        Self {
            id: message.id(),
            sender_username: message.sender().clone(),
            sender_photo_url: profiles
                .main_photo_url(message.sender())
                .map(str::to_owned),
            recipient_username: message.recipient().clone(),
            recipient_photo_url: profiles
                .main_photo_url(message.recipient())
                .map(str::to_owned),
            content: message.content().to_owned(),
            sent_at: message.sent_at(),
            read_at: message.read_at(),
        }
    }
}
