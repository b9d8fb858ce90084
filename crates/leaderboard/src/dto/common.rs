use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::config::DEFAULT_PAGE_SIZE;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: usize = 500;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate, IntoParams, ToSchema,
)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be >= 1"))]
    pub page: usize,
    #[serde(default = "default_page_size")]
    #[validate(range(
        min = 1,
        max = MAX_PAGE_SIZE,
        message = "page_size must be between 1 and 500"
    ))]
    pub page_size: usize,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self { page, page_size }
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1) * self.page_size
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self::new(default_page(), default_page_size())
    }
}

/// One page of an ordered collection, with its position in the whole.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number, always within `1..=max(1, total_pages)`.
    pub index: usize,
    pub size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// Zero-based offset of the first item on this page.
    pub start_index: usize,
    /// Exclusive end offset.
    pub end_index: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts the items, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            index: self.index,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            start_index: self.start_index,
            end_index: self.end_index,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

/// The page-number buttons a pager shows around the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageWindow {
    pub pages: Vec<usize>,
    /// Page 1 is outside `pages` and gets its own button.
    pub show_first: bool,
    /// A gap separates page 1 from `pages`.
    pub leading_ellipsis: bool,
    pub show_last: bool,
    pub trailing_ellipsis: bool,
}
