//! Image records and their owning scope.

use crate::ids::{ImageId, lenient_string};
use crate::pagination::PaginationState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The polymorphic owner of an image: which model, which record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefScope {
    pub ref_model: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ref_id: String,
}

impl RefScope {
    pub fn new(ref_model: impl Into<String>, ref_id: impl Into<String>) -> Self {
        Self {
            ref_model: ref_model.into(),
            ref_id: ref_id.into(),
        }
    }
}

impl fmt::Display for RefScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ref_model, self.ref_id)
    }
}

/// An uploaded image attached to a catalog entity.
///
/// At most one record per `(ref_model, ref_id)` is primary. The backend
/// enforces that; clients never flip `primary` locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    #[serde(alias = "_id")]
    pub id: ImageId,
    pub url: String,
    pub public_id: String,
    #[serde(default)]
    pub primary: bool,
    pub ref_model: String,
    #[serde(deserialize_with = "lenient_string")]
    pub ref_id: String,
    #[serde(with = "crate::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl ImageRecord {
    /// The entity this image is attached to.
    pub fn scope(&self) -> RefScope {
        RefScope::new(&self.ref_model, &self.ref_id)
    }

    pub fn belongs_to(&self, scope: &RefScope) -> bool {
        self.ref_model == scope.ref_model && self.ref_id == scope.ref_id
    }
}

/// One page of images as returned by the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePage {
    #[serde(default, alias = "images")]
    pub data: Vec<ImageRecord>,
    #[serde(default)]
    pub pagination: PaginationState,
}

impl ImagePage {
    /// Parses a listing response body.
    pub fn from_json(body: &str) -> crate::Result<Self> {
        let mut page: ImagePage = serde_json::from_str(body)?;
        page.pagination = page.pagination.normalized();
        Ok(page)
    }
}
