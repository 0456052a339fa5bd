//! REST client for the Vitrine catalog backend.
//!
//! The [`CatalogApi`] trait is the seam the view-models depend on;
//! [`HttpCatalogApi`] implements it over HTTP with `reqwest`.
//!
//! Authentication is never ambient: callers build a [`Session`] and hand it
//! to the client, which attaches the bearer token to every request.
//!
//! # Example
//!
//! ```
//! use vitrine_api::{ApiConfig, HttpCatalogApi, Session};
//!
//! let config = ApiConfig {
//!     base_url: "https://cms.example.com/api".to_string(),
//!     ..Default::default()
//! };
//! let api = HttpCatalogApi::new(config, Session::with_token("secret")).unwrap();
//! assert_eq!(api.base_url(), "https://cms.example.com/api");
//! ```

mod client;
mod config;
mod error;
mod http;

pub use client::{CatalogApi, ImageQuery};
pub use config::{ApiConfig, DEFAULT_BASE_URL, Session, SessionUser};
pub use error::{ApiError, ApiResult};
pub use http::HttpCatalogApi;
