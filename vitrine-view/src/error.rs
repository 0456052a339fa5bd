//! Error types for the view layer.

use thiserror::Error;
use vitrine_api::ApiError;
use vitrine_types::ImageId;

/// Result type for view-model operations.
pub type ViewResult<T> = Result<T, ViewError>;

/// Errors surfaced by view-model operations.
///
/// None of them is fatal: the view stays usable and the user re-triggers
/// the action to retry.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The user cancelled a destructive action. Never shown as an error.
    #[error("action cancelled by user")]
    ConfirmationDeclined,

    #[error("image {0} is not on the current page and no scope is set")]
    UnknownImage(ImageId),
}

impl ViewError {
    /// Whether this outcome should stay out of the error channel.
    pub fn is_silent(&self) -> bool {
        matches!(self, ViewError::ConfirmationDeclined)
    }

    /// HTTP status behind the error, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ViewError::Api(e) => e.status(),
            _ => None,
        }
    }

    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            ViewError::Api(ApiError::AuthRequired) => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ViewError::Api(ApiError::Model(vitrine_types::Error::Validation(msg))) => msg.clone(),
            ViewError::Api(e) if e.is_retryable() => {
                format!("Could not reach the catalog server ({e}). Please try again.")
            }
            other => other.to_string(),
        }
    }
}
