//! Image collection view-model.
//!
//! A state machine without I/O. Every fetch is started with
//! [`ImageCollectionView::begin_fetch`], which bumps a generation counter and
//! returns a [`FetchTicket`]. The response is handed back through
//! [`ImageCollectionView::complete_fetch`]; if a newer fetch has started in
//! the meantime the response is dropped, so a slow page can never overwrite
//! a newer one.

use crate::error::ViewError;
use crate::filter::{FilterState, PrimaryFilter, SortKey, apply_filters};
use tracing::{debug, warn};
use vitrine_api::{ApiResult, ImageQuery};
use vitrine_types::{ImageId, ImagePage, ImageRecord, PageSummary, PaginationState, RefScope};

/// Handle for one in-flight listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    query: ImageQuery,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The request to send.
    pub fn query(&self) -> &ImageQuery {
        &self.query
    }
}

/// What [`ImageCollectionView::complete_fetch`] did with a response.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page replaced the held records.
    Applied,
    /// The request failed; the error is now on the banner.
    Failed(ViewError),
    /// A newer fetch had started; the response was dropped.
    Stale,
}

impl FetchOutcome {
    pub fn is_stale(&self) -> bool {
        matches!(self, FetchOutcome::Stale)
    }
}

/// One page of images plus local filter, loading and error state.
#[derive(Debug, Clone)]
pub struct ImageCollectionView {
    records: Vec<ImageRecord>,
    pagination: PaginationState,
    filter: FilterState,
    scope: Option<RefScope>,
    loading: bool,
    error: Option<String>,
    generation: u64,
}

impl ImageCollectionView {
    /// Creates an empty view on page 1.
    pub fn new(limit: u64, scope: Option<RefScope>) -> Self {
        Self {
            records: Vec::new(),
            pagination: PaginationState::first(limit),
            filter: FilterState::default(),
            scope,
            loading: false,
            error: None,
            generation: 0,
        }
    }

    /// Records of the current page, unfiltered, in server order.
    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    /// Records after the local search, partition and sort.
    pub fn visible(&self) -> Vec<ImageRecord> {
        apply_filters(&self.records, &self.filter)
    }

    pub fn find(&self, id: &ImageId) -> Option<&ImageRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Footer for the grid. An empty list shows `0-0`; after a failed fetch
    /// the total is 0 as well, while `pagination` keeps the page to retry.
    pub fn summary(&self) -> PageSummary {
        if !self.records.is_empty() {
            return self.pagination.summary();
        }
        PageSummary {
            first: 0,
            last: 0,
            total: if self.error.is_some() { 0 } else { self.pagination.total },
        }
    }

    pub fn scope(&self) -> Option<&RefScope> {
        self.scope.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The banner message, if the last operation failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Generation of the most recently started fetch.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ── Local filter (no refetch) ───────────────────────────────

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.search_query = query.into();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.filter.sort_key = key;
    }

    pub fn set_primary_filter(&mut self, partition: PrimaryFilter) {
        self.filter.primary_filter = partition;
    }

    // ── Fetch lifecycle ─────────────────────────────────────────

    /// Starts a fetch of `page` with the current limit and scope.
    /// Any fetch started earlier becomes stale.
    pub fn begin_fetch(&mut self, page: u64) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        let query = ImageQuery {
            page,
            limit: self.pagination.limit,
            scope: self.scope.clone(),
        };
        debug!(generation = self.generation, page, "image fetch started");
        FetchTicket {
            generation: self.generation,
            query,
        }
    }

    /// Applies a response unless its ticket has been superseded.
    ///
    /// On failure the error supersedes the list: records are cleared and
    /// the banner message is set.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, result: ApiResult<ImagePage>) -> FetchOutcome {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale image response"
            );
            return FetchOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.records = page.data;
                self.pagination = page.pagination.normalized();
                self.error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                let err = ViewError::from(e);
                warn!(error = %err, "image fetch failed");
                self.records.clear();
                self.error = Some(err.user_message());
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Moves to page `n` and starts its fetch. Out-of-range pages are a
    /// no-op and return `None`.
    pub fn go_to_page(&mut self, page: u64) -> Option<FetchTicket> {
        if !self.pagination.contains_page(page) {
            debug!(page, total_pages = self.pagination.total_pages, "page out of range");
            return None;
        }
        self.pagination.page = page;
        Some(self.begin_fetch(page))
    }

    /// Sets page size and scope without fetching; the next fetch starts
    /// from a fresh pagination block.
    pub fn reset(&mut self, limit: u64, scope: Option<RefScope>) {
        self.pagination = PaginationState::first(limit);
        self.scope = scope;
    }

    /// Changes the page size and restarts from page 1.
    pub fn set_limit(&mut self, limit: u64) -> FetchTicket {
        self.pagination = PaginationState::first(limit);
        self.begin_fetch(1)
    }

    /// Changes the owning entity filter and restarts from page 1.
    pub fn set_scope(&mut self, scope: Option<RefScope>) -> FetchTicket {
        self.scope = scope;
        self.pagination.page = 1;
        self.begin_fetch(1)
    }

    /// Re-fetches the current page.
    pub fn refresh(&mut self) -> FetchTicket {
        self.begin_fetch(self.pagination.page)
    }

    /// Reports a failed mutation on the shared error channel. Silent errors
    /// (a declined confirmation) leave the channel untouched.
    pub fn report_error(&mut self, err: &ViewError) {
        if err.is_silent() {
            return;
        }
        warn!(error = %err, "image action failed");
        self.error = Some(err.user_message());
    }

    /// The scope a primary-image change for `id` applies to: the view's own
    /// scope, else the owner recorded on the image.
    pub fn primary_scope_for(&self, id: &ImageId) -> Option<RefScope> {
        self.scope
            .clone()
            .or_else(|| self.find(id).map(ImageRecord::scope))
    }
}

impl Default for ImageCollectionView {
    fn default() -> Self {
        Self::new(vitrine_types::DEFAULT_PAGE_LIMIT, None)
    }
}
