//! Catalog API abstraction trait.
//!
//! Defines the operations the view-models need from the backend.

use crate::error::ApiResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use vitrine_types::{
    CategoryDraft, CategoryForest, CategoryId, CategoryNode, DEFAULT_PAGE_LIMIT, ImageId,
    ImagePage, RefScope,
};

/// Parameters of an image listing request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageQuery {
    /// 1-based page number.
    pub page: u64,
    pub limit: u64,
    /// Restricts the listing to images of one entity.
    pub scope: Option<RefScope>,
}

impl Default for ImageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            scope: None,
        }
    }
}

impl ImageQuery {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page,
            limit,
            scope: None,
        }
    }

    #[must_use]
    pub fn scoped(mut self, scope: RefScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Query-string pairs in the order the backend documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(scope) = &self.scope {
            pairs.push(("refModel", scope.ref_model.clone()));
            pairs.push(("refId", scope.ref_id.clone()));
        }
        pairs
    }
}

/// Abstract catalog backend.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches one page of images, optionally scoped to an entity.
    async fn list_images(&self, query: &ImageQuery) -> ApiResult<ImagePage>;

    /// Deletes an image.
    async fn delete_image(&self, id: &ImageId) -> ApiResult<()>;

    /// Makes an image the primary one of its entity.
    async fn set_primary_image(&self, id: &ImageId, scope: &RefScope) -> ApiResult<()>;

    /// Fetches every category, assembled into a forest.
    async fn list_categories(&self) -> ApiResult<CategoryForest>;

    /// Creates a category and returns it as stored.
    async fn create_category(&self, draft: &CategoryDraft) -> ApiResult<CategoryNode>;

    /// Replaces a category's fields and returns it as stored.
    async fn update_category(&self, id: &CategoryId, draft: &CategoryDraft)
    -> ApiResult<CategoryNode>;

    /// Deletes a category.
    async fn delete_category(&self, id: &CategoryId) -> ApiResult<()>;
}

#[async_trait]
impl<T: CatalogApi + ?Sized> CatalogApi for Arc<T> {
    async fn list_images(&self, query: &ImageQuery) -> ApiResult<ImagePage> {
        (**self).list_images(query).await
    }

    async fn delete_image(&self, id: &ImageId) -> ApiResult<()> {
        (**self).delete_image(id).await
    }

    async fn set_primary_image(&self, id: &ImageId, scope: &RefScope) -> ApiResult<()> {
        (**self).set_primary_image(id, scope).await
    }

    async fn list_categories(&self) -> ApiResult<CategoryForest> {
        (**self).list_categories().await
    }

    async fn create_category(&self, draft: &CategoryDraft) -> ApiResult<CategoryNode> {
        (**self).create_category(draft).await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> ApiResult<CategoryNode> {
        (**self).update_category(id, draft).await
    }

    async fn delete_category(&self, id: &CategoryId) -> ApiResult<()> {
        (**self).delete_category(id).await
    }
}
