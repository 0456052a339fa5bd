//! View-models for the Vitrine catalog CMS.
//!
//! Two independent units sit between the REST client and whatever renders
//! the screen:
//!
//! - [`CategoryTreeView`] holds a category forest, per-node expand state and
//!   optional action callbacks. It never fetches.
//! - [`ImageCollectionView`] holds one page of images, the local filter and
//!   the error channel. It is a pure state machine: it hands out
//!   [`FetchTicket`]s and accepts responses, discarding any response whose
//!   ticket has been superseded. [`ImageGallery`] drives it against a
//!   [`vitrine_api::CatalogApi`].
//!
//! # Example
//!
//! ```
//! use vitrine_types::{CategoryForest, CategoryNode};
//! use vitrine_view::{CategoryActions, CategoryTreeView, Expander};
//!
//! let forest = CategoryForest::from_roots(vec![
//!     CategoryNode::new("shoes", "Shoes").with_child(CategoryNode::new("boots", "Boots")),
//! ]);
//! let mut tree = CategoryTreeView::new(forest, CategoryActions::new());
//!
//! assert_eq!(tree.visible_rows().len(), 1);
//! tree.toggle_expand(&"shoes".into());
//! let rows = tree.visible_rows();
//! assert_eq!(rows.len(), 2);
//! assert_eq!(rows[1].expander, Expander::Leaf);
//! ```

mod category_tree;
mod error;
pub mod filter;
mod gallery;
mod images;

pub use category_tree::{CategoryActionKind, CategoryActions, CategoryTreeView, Expander, TreeRow};
pub use error::{ViewError, ViewResult};
pub use filter::{FilterState, PrimaryFilter, SortKey, apply_filters};
pub use gallery::{Confirm, GalleryConfig, ImageGallery};
pub use images::{FetchOutcome, FetchTicket, ImageCollectionView};
