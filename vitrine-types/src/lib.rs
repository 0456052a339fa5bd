//! Core type definitions for the Vitrine catalog CMS.
//!
//! This crate defines the records exchanged with the catalog backend:
//! - Category and image identifiers (opaque backend strings)
//! - [`CategoryNode`] forests, assembled from flat or nested payloads
//! - [`ImageRecord`] and the `(refModel, refId)` scope it belongs to
//! - [`PaginationState`] for paged listings
//!
//! Nothing here performs I/O. Fetching lives in `vitrine-api`, derived
//! views in `vitrine-view`.

mod category;
mod ids;
mod image;
mod pagination;
mod timestamp;

pub use category::{CategoryDraft, CategoryForest, CategoryNode, Walk, build_forest};
pub use ids::{CategoryId, ImageId};
pub use image::{ImagePage, ImageRecord, RefScope};
pub use pagination::{DEFAULT_PAGE_LIMIT, PageSummary, PaginationState};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
