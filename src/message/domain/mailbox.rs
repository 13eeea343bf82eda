//! Mailbox view requests: container selection and paging bounds.

use super::{MessageDomainError, Username};
use serde::{Deserialize, Serialize};

/// Named mailbox view a user asks for.
///
/// Deserialisation goes through [`Container::parse`], so any string is
/// accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Container {
    /// Messages received by the user.
    Inbox,
    /// Messages sent by the user.
    Outbox,
    /// Received messages the user has not read yet.
    #[default]
    Unread,
}

impl Container {
    /// Parses a container name, ignoring case.
    ///
    /// Unrecognised or empty names select [`Container::Unread`]. Surrounding
    /// whitespace is not stripped, so `" inbox "` is unrecognised.
    ///
    /// # Examples
    ///
    /// ```
    /// use letterbox::message::domain::Container;
    ///
    /// assert_eq!(Container::parse("INBOX"), Container::Inbox);
    /// assert_eq!(Container::parse("archive"), Container::Unread);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "inbox" => Self::Inbox,
            "outbox" => Self::Outbox,
            _ => Self::Unread,
        }
    }

    /// Returns the canonical container name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inbox => "inbox",
            Self::Outbox => "outbox",
            Self::Unread => "unread",
        }
    }
}

impl From<&str> for Container {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<String> for Container {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

/// One-based page selection with a bounded page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Page size used when the caller does not choose one.
    pub const DEFAULT_PAGE_SIZE: u32 = 10;

    /// Largest page size a caller may request; larger values are clamped.
    pub const MAX_PAGE_SIZE: u32 = 50;

    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns [`MessageDomainError::InvalidPageNumber`] or
    /// [`MessageDomainError::InvalidPageSize`] when either value is zero.
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, MessageDomainError> {
        if page_number == 0 {
            return Err(MessageDomainError::InvalidPageNumber(page_number));
        }
        if page_size == 0 {
            return Err(MessageDomainError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page_number,
            page_size: page_size.min(Self::MAX_PAGE_SIZE),
        })
    }

    /// Returns the one-based page number.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Returns the effective page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns how many items precede this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}

/// Caller request for one page of a user's mailbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailboxQuery {
    container: Container,
    username: Username,
    page: PageRequest,
}

impl MailboxQuery {
    /// Creates a query for the user's unread messages on the first page.
    #[must_use]
    pub fn new(username: Username) -> Self {
        Self {
            container: Container::default(),
            username,
            page: PageRequest::default(),
        }
    }

    /// Selects the mailbox container.
    #[must_use]
    pub const fn with_container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    /// Selects the page to return.
    #[must_use]
    pub const fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Returns the requested container.
    #[must_use]
    pub const fn container(&self) -> Container {
        self.container
    }

    /// Returns the requesting user.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the requested page.
    #[must_use]
    pub const fn page(&self) -> PageRequest {
        self.page
    }
}
