//! External collaborators consumed by an edit session.
//!
//! The engine never talks to the network itself; it goes through these seams.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_core::{CategoryId, ProductId};
use storefront_products::{ProductRecord, SaveProductRequest};

/// Failure reported by a collaborator. The message is displayed as given,
/// without a prefix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Network(String),
}

/// Entry of the category picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// A file handed to the image store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Product fetch/save and category listing.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Load the product an edit session is seeded from.
    async fn fetch_product(&self, id: ProductId) -> Result<ProductRecord, CollaboratorError>;

    async fn list_categories(&self) -> Result<Vec<Category>, CollaboratorError>;

    /// Persist a validated draft and return the stored product.
    ///
    /// Variants with `id: null` are created; the returned record carries their
    /// newly assigned ids.
    async fn save_product(&self, request: SaveProductRequest) -> Result<ProductRecord, CollaboratorError>;
}

/// Image hosting. The returned string is stored as-is on the option value.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, image: ImageUpload) -> Result<String, CollaboratorError>;
}

#[async_trait]
impl<C> ProductCatalog for Arc<C>
where
    C: ProductCatalog + ?Sized,
{
    async fn fetch_product(&self, id: ProductId) -> Result<ProductRecord, CollaboratorError> {
        (**self).fetch_product(id).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CollaboratorError> {
        (**self).list_categories().await
    }

    async fn save_product(&self, request: SaveProductRequest) -> Result<ProductRecord, CollaboratorError> {
        (**self).save_product(request).await
    }
}

#[async_trait]
impl<S> ImageStore for Arc<S>
where
    S: ImageStore + ?Sized,
{
    async fn upload(&self, image: ImageUpload) -> Result<String, CollaboratorError> {
        (**self).upload(image).await
    }
}
