//! Image gallery orchestrator.
//!
//! Drives an [`ImageCollectionView`] against a [`CatalogApi`]: issues the
//! listing calls, feeds responses back, and turns delete / set-primary
//! intents into mutation calls followed by a full refetch.

use crate::error::{ViewError, ViewResult};
use crate::images::{FetchOutcome, FetchTicket, ImageCollectionView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use vitrine_api::CatalogApi;
use vitrine_types::{DEFAULT_PAGE_LIMIT, ImageId, RefScope};

/// Blocking yes/no prompt shown before destructive actions.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Initial settings of a gallery screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub page_limit: u64,
    /// Entity whose images are listed; `None` lists every image.
    pub scope: Option<RefScope>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            page_limit: DEFAULT_PAGE_LIMIT,
            scope: None,
        }
    }
}

/// An image collection view bound to a catalog backend.
pub struct ImageGallery {
    api: Arc<dyn CatalogApi>,
    view: ImageCollectionView,
}

impl ImageGallery {
    pub fn new(api: Arc<dyn CatalogApi>, config: GalleryConfig) -> Self {
        Self {
            api,
            view: ImageCollectionView::new(config.page_limit, config.scope),
        }
    }

    pub fn view(&self) -> &ImageCollectionView {
        &self.view
    }

    /// Mutable access for local filter changes and for callers that run
    /// fetches themselves with [`ImageCollectionView::begin_fetch`].
    pub fn view_mut(&mut self) -> &mut ImageCollectionView {
        &mut self.view
    }

    /// The backend, for callers that run tickets on their own tasks.
    pub fn api(&self) -> Arc<dyn CatalogApi> {
        Arc::clone(&self.api)
    }

    /// Sends a ticket and applies the response. When the listing shrank
    /// under the requested page (e.g. after deleting the last item of the
    /// last page) the clamped page is fetched once more.
    async fn run(&mut self, mut ticket: FetchTicket) -> ViewResult<()> {
        let mut retried = false;
        loop {
            let result = self.api.list_images(ticket.query()).await;
            match self.view.complete_fetch(&ticket, result) {
                FetchOutcome::Failed(err) => return Err(err),
                FetchOutcome::Stale => return Ok(()),
                FetchOutcome::Applied => {
                    let landed = self.view.pagination().page;
                    if retried || landed >= ticket.query().page {
                        return Ok(());
                    }
                    debug!(requested = ticket.query().page, landed, "page out of range, refetching");
                    retried = true;
                    ticket = self.view.begin_fetch(landed);
                }
            }
        }
    }

    /// Fetches the current page.
    pub async fn fetch(&mut self) -> ViewResult<()> {
        let ticket = self.view.refresh();
        self.run(ticket).await
    }

    /// Fetches `page` of `limit` images, optionally scoped to one entity.
    pub async fn fetch_page(
        &mut self,
        page: u64,
        limit: u64,
        scope: Option<RefScope>,
    ) -> ViewResult<()> {
        self.view.reset(limit, scope);
        let ticket = self.view.begin_fetch(page.max(1));
        self.run(ticket).await
    }

    /// Navigates to page `n`. Returns `Ok(false)` without any request when
    /// `n` is out of range.
    pub async fn go_to_page(&mut self, page: u64) -> ViewResult<bool> {
        match self.view.go_to_page(page) {
            Some(ticket) => self.run(ticket).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Switches the owning entity and reloads from page 1.
    pub async fn set_scope(&mut self, scope: Option<RefScope>) -> ViewResult<()> {
        let ticket = self.view.set_scope(scope);
        self.run(ticket).await
    }

    /// Re-issues the current page; the retry behind the error banner.
    pub async fn refresh(&mut self) -> ViewResult<()> {
        self.fetch().await
    }

    /// Asks the backend to make `id` the primary image of its entity, then
    /// reloads the page. Primary flags are never flipped locally.
    pub async fn set_primary(&mut self, id: &ImageId) -> ViewResult<()> {
        let Some(scope) = self.view.primary_scope_for(id) else {
            let err = ViewError::UnknownImage(id.clone());
            self.view.report_error(&err);
            return Err(err);
        };
        if let Err(e) = self.api.set_primary_image(id, &scope).await {
            let err = ViewError::from(e);
            self.view.report_error(&err);
            return Err(err);
        }
        info!(image = %id, %scope, "primary image changed");
        self.fetch().await
    }

    /// Deletes `id` after the user confirms, then reloads the page.
    ///
    /// A declined prompt returns [`ViewError::ConfirmationDeclined`] and
    /// leaves the error channel alone.
    pub async fn delete(&mut self, id: &ImageId, confirm: &dyn Confirm) -> ViewResult<()> {
        let label = self
            .view
            .find(id)
            .map(|record| record.public_id.clone())
            .unwrap_or_else(|| id.to_string());
        if !confirm.confirm(&format!("Delete image \"{label}\"? This cannot be undone.")) {
            return Err(ViewError::ConfirmationDeclined);
        }
        if let Err(e) = self.api.delete_image(id).await {
            let err = ViewError::from(e);
            self.view.report_error(&err);
            return Err(err);
        }
        info!(image = %id, "image deleted");
        self.fetch().await
    }
}
