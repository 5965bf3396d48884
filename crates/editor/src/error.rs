use thiserror::Error;

use storefront_core::DomainError;
use storefront_products::ValidationError;

use crate::collaborator::CollaboratorError;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("draft rejected: {0}")]
    Validation(#[from] ValidationError),

    /// Collaborator message, surfaced unchanged.
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    #[error("a save is already in flight")]
    SubmitInFlight,

    #[error("no save is in flight")]
    NoSubmitInFlight,
}

pub type EditorResult<T> = Result<T, EditorError>;
