//! Shared test helpers for view-model tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Mutex;
use vitrine_api::{ApiError, ApiResult, CatalogApi, ImageQuery};
use vitrine_types::{
    CategoryDraft, CategoryForest, CategoryId, CategoryNode, ImageId, ImagePage, ImageRecord,
    PaginationState, RefScope,
};

/// Midnight UTC on the given date (`YYYY-MM-DD`).
pub fn day(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// An image owned by `Product/p1`.
pub fn record(id: &str, public_id: &str, primary: bool, created: &str) -> ImageRecord {
    ImageRecord {
        id: ImageId::new(id),
        url: format!("https://cdn.example.com/{public_id}.jpg"),
        public_id: public_id.to_string(),
        primary,
        ref_model: "Product".to_string(),
        ref_id: "p1".to_string(),
        created_at: day(created),
        updated_at: day(created),
    }
}

/// The two records used throughout the gallery scenarios.
pub fn cat_and_dog() -> Vec<ImageRecord> {
    vec![
        record("1", "cat", false, "2024-01-01"),
        record("2", "dog", true, "2024-02-01"),
    ]
}

pub fn page_of(records: Vec<ImageRecord>, total: u64, page: u64, limit: u64) -> ImagePage {
    ImagePage {
        data: records,
        pagination: PaginationState::new(total, page, limit),
    }
}

/// Calls observed by [`FakeCatalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(ImageQuery),
    Delete(ImageId),
    SetPrimary(ImageId, RefScope),
}

/// In-memory catalog: serves `images` in pages and applies mutations.
#[derive(Default)]
pub struct FakeCatalog {
    pub images: Mutex<Vec<ImageRecord>>,
    pub calls: Mutex<Vec<Call>>,
    pub fail_list: Mutex<bool>,
    pub fail_mutations: Mutex<bool>,
}

impl FakeCatalog {
    pub fn with_images(images: Vec<ImageRecord>) -> Self {
        Self {
            images: Mutex::new(images),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::List(_)))
            .count()
    }

    pub fn set_fail_list(&self, fail: bool) {
        *self.fail_list.lock().unwrap() = fail;
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        *self.fail_mutations.lock().unwrap() = fail;
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn list_images(&self, query: &ImageQuery) -> ApiResult<ImagePage> {
        self.calls.lock().unwrap().push(Call::List(query.clone()));
        if *self.fail_list.lock().unwrap() {
            return Err(ApiError::Network("connection reset".to_string()));
        }
        let images = self.images.lock().unwrap();
        let scoped: Vec<ImageRecord> = images
            .iter()
            .filter(|r| query.scope.as_ref().is_none_or(|s| r.belongs_to(s)))
            .cloned()
            .collect();
        let total = scoped.len() as u64;
        let start = ((query.page.max(1) - 1) * query.limit) as usize;
        let data = scoped
            .into_iter()
            .skip(start)
            .take(query.limit as usize)
            .collect();
        Ok(page_of(data, total, query.page, query.limit))
    }

    async fn delete_image(&self, id: &ImageId) -> ApiResult<()> {
        self.calls.lock().unwrap().push(Call::Delete(id.clone()));
        if *self.fail_mutations.lock().unwrap() {
            return Err(ApiError::Status {
                status: 500,
                message: "delete failed".to_string(),
            });
        }
        let mut images = self.images.lock().unwrap();
        let before = images.len();
        images.retain(|r| &r.id != id);
        if images.len() == before {
            return Err(ApiError::NotFound(format!("/images/{id}")));
        }
        Ok(())
    }

    async fn set_primary_image(&self, id: &ImageId, scope: &RefScope) -> ApiResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::SetPrimary(id.clone(), scope.clone()));
        if *self.fail_mutations.lock().unwrap() {
            return Err(ApiError::Status {
                status: 422,
                message: "image not in scope".to_string(),
            });
        }
        let mut images = self.images.lock().unwrap();
        for image in images.iter_mut().filter(|r| r.belongs_to(scope)) {
            image.primary = &image.id == id;
        }
        Ok(())
    }

    async fn list_categories(&self) -> ApiResult<CategoryForest> {
        Ok(CategoryForest::default())
    }

    async fn create_category(&self, draft: &CategoryDraft) -> ApiResult<CategoryNode> {
        draft.validate()?;
        Ok(CategoryNode::new("new", draft.name.clone()))
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> ApiResult<CategoryNode> {
        Ok(CategoryNode::new(id.clone(), draft.name.clone()))
    }

    async fn delete_category(&self, _id: &CategoryId) -> ApiResult<()> {
        Ok(())
    }
}
