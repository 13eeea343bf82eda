//! Paged result sets.

use super::PageRequest;
use serde::{Deserialize, Serialize};

/// One page of an ordered, filtered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    total_count: u64,
    current_page: u32,
    total_pages: u32,
    page_size: u32,
}

impl<T> Page<T> {
    /// Creates a page from its slice and the size of the full result set.
    ///
    /// # Examples
    ///
    /// ```
    /// use letterbox::message::domain::{Page, PageRequest};
    ///
    /// let request = PageRequest::new(2, 10).expect("valid page");
    /// let page = Page::new(vec![1, 2, 3], 13, request);
    /// assert_eq!(page.total_pages(), 2);
    /// assert_eq!(page.current_page(), 2);
    /// ```
    #[must_use]
    pub fn new(items: Vec<T>, total_count: u64, request: PageRequest) -> Self {
        let page_size = request.page_size();
        let pages = total_count.div_ceil(u64::from(page_size.max(1)));
        Self {
            items,
            total_count,
            current_page: request.page_number(),
            total_pages: u32::try_from(pages).unwrap_or(u32::MAX),
            page_size,
        }
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the number of items across all pages.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns the one-based number of this page.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Returns the number of pages in the result set.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Returns the page size the slice was taken with.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maps every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            current_page: self.current_page,
            total_pages: self.total_pages,
            page_size: self.page_size,
        }
    }

    /// Returns the paging metadata as a response header payload.
    #[must_use]
    pub const fn header(&self) -> PaginationHeader {
        PaginationHeader {
            current_page: self.current_page,
            items_per_page: self.page_size,
            total_items: self.total_count,
            total_pages: self.total_pages,
        }
    }
}

/// Paging metadata a web layer sends alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationHeader {
    /// One-based number of the returned page.
    pub current_page: u32,
    /// Page size the slice was taken with.
    pub items_per_page: u32,
    /// Number of items across all pages.
    pub total_items: u64,
    /// Number of pages in the result set.
    pub total_pages: u32,
}

impl PaginationHeader {
    /// Name of the response header carrying this payload.
    pub const HEADER_NAME: &'static str = "Pagination";

    /// Serialises the header value as JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error if serialisation fails.
    pub fn to_header_value(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
