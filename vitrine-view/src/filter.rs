//! Local filtering and sorting of the current image page.
//!
//! [`apply_filters`] is pure: it never invents records, and applying it to
//! its own output changes nothing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use vitrine_types::ImageRecord;

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Newest first.
    #[default]
    CreatedAt,
    /// Lexicographic ascending.
    PublicId,
    /// Primary images before the rest; ties keep page order.
    Primary,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::CreatedAt => "createdAt",
            SortKey::PublicId => "publicId",
            SortKey::Primary => "primary",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "createdat" | "created" | "date" => Ok(SortKey::CreatedAt),
            "publicid" | "name" => Ok(SortKey::PublicId),
            "primary" => Ok(SortKey::Primary),
            _ => Err(format!("unknown sort key: {s}")),
        }
    }
}

/// Which side of the primary/secondary partition to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimaryFilter {
    #[default]
    All,
    Primary,
    Secondary,
}

impl PrimaryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryFilter::All => "all",
            PrimaryFilter::Primary => "primary",
            PrimaryFilter::Secondary => "secondary",
        }
    }

    fn keeps(&self, record: &ImageRecord) -> bool {
        match self {
            PrimaryFilter::All => true,
            PrimaryFilter::Primary => record.primary,
            PrimaryFilter::Secondary => !record.primary,
        }
    }
}

impl fmt::Display for PrimaryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimaryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "all" => Ok(PrimaryFilter::All),
            "primary" => Ok(PrimaryFilter::Primary),
            "secondary" => Ok(PrimaryFilter::Secondary),
            _ => Err(format!("unknown primary filter: {s}")),
        }
    }
}

fn normalize_token(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '-' | '_'))
        .collect::<String>()
        .to_lowercase()
}

/// Search, partition and ordering settings for the image grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Case-insensitive substring matched against `publicId`. Empty matches all.
    pub search_query: String,
    pub sort_key: SortKey,
    pub primary_filter: PrimaryFilter,
}

impl FilterState {
    pub fn new(search_query: impl Into<String>, sort_key: SortKey, primary_filter: PrimaryFilter) -> Self {
        Self {
            search_query: search_query.into(),
            sort_key,
            primary_filter,
        }
    }

    /// Whether a record survives the search and partition steps.
    pub fn matches(&self, record: &ImageRecord) -> bool {
        self.matches_search(record) && self.primary_filter.keeps(record)
    }

    fn matches_search(&self, record: &ImageRecord) -> bool {
        self.search_query.is_empty()
            || record
                .public_id
                .to_lowercase()
                .contains(&self.search_query.to_lowercase())
    }
}

/// Filters by search, then partition, then sorts (stable) by the sort key.
pub fn apply_filters(records: &[ImageRecord], filter: &FilterState) -> Vec<ImageRecord> {
    let mut out: Vec<ImageRecord> = records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect();

    match filter.sort_key {
        SortKey::PublicId => out.sort_by(|a, b| a.public_id.cmp(&b.public_id)),
        SortKey::CreatedAt => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Primary => out.sort_by_key(|record| !record.primary),
    }
    out
}
