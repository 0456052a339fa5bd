//! Page bookkeeping for listing endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page size used when nobody asks for another one.
pub const DEFAULT_PAGE_LIMIT: u64 = 12;

/// Position within a paged listing. Pages are 1-based.
///
/// Invariant (after [`PaginationState::normalized`]):
/// `1 <= page <= max(total_pages, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub total_pages: u64,
}

fn first_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            total: 0,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            total_pages: 0,
        }
    }
}

impl PaginationState {
    /// Builds a state from a total count, deriving the page count.
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: pages_for(total, limit),
        }
        .normalized()
    }

    /// An empty listing positioned on page 1.
    pub fn first(limit: u64) -> Self {
        Self::new(0, 1, limit)
    }

    /// Restores the page invariant, deriving `total_pages` when the server
    /// left it out.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.total_pages == 0 && self.total > 0 {
            self.total_pages = pages_for(self.total, self.limit);
        }
        self.page = self.page.clamp(1, self.total_pages.max(1));
        self
    }

    /// Whether `page` addresses an existing page.
    pub fn contains_page(&self, page: u64) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Number of items on the current page.
    ///
    /// Every page but the last is full. The last page holds
    /// `total % limit`, or a full `limit` when that remainder is zero.
    pub fn items_on_page(&self) -> u64 {
        if self.total == 0 || self.limit == 0 || self.page > self.total_pages {
            return 0;
        }
        if self.page < self.total_pages {
            return self.limit;
        }
        match self.total % self.limit {
            0 => self.limit,
            rest => rest,
        }
    }

    /// The "showing X–Y of Z" footer for the current page.
    pub fn summary(&self) -> PageSummary {
        let count = self.items_on_page();
        if count == 0 {
            return PageSummary {
                first: 0,
                last: 0,
                total: self.total,
            };
        }
        let first = (self.page - 1) * self.limit + 1;
        PageSummary {
            first,
            last: first + count - 1,
            total: self.total,
        }
    }
}

fn pages_for(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// Item range shown on the current page, 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSummary {
    pub first: u64,
    pub last: u64,
    pub total: u64,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {}-{} of {}", self.first, self.last, self.total)
    }
}
