//! In-memory collaborators for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use storefront_core::{OptionAxisId, OptionValueId, ProductId, VariantId};
use storefront_products::{OptionAxis, OptionValue, ProductRecord, SaveProductRequest, Variant};

use crate::collaborator::{Category, CollaboratorError, ImageStore, ImageUpload, ProductCatalog};

fn poisoned<T>(_: T) -> CollaboratorError {
    CollaboratorError::Network("lock poisoned".to_string())
}

/// Catalog backed by a map. Assigns fresh ids to new rows on save.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<HashMap<ProductId, ProductRecord>>,
    categories: RwLock<Vec<Category>>,
    payloads: RwLock<Vec<serde_json::Value>>,
    failure: RwLock<Option<CollaboratorError>>,
    latency: Option<Duration>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every call, to keep a save in flight for a while.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn insert_product(&self, record: ProductRecord) -> Result<(), CollaboratorError> {
        self.products.write().map_err(poisoned)?.insert(record.id, record);
        Ok(())
    }

    pub fn insert_category(&self, category: Category) -> Result<(), CollaboratorError> {
        self.categories.write().map_err(poisoned)?.push(category);
        Ok(())
    }

    pub fn product(&self, id: ProductId) -> Result<Option<ProductRecord>, CollaboratorError> {
        Ok(self.products.read().map_err(poisoned)?.get(&id).cloned())
    }

    /// Every save request received so far, in its JSON wire shape.
    pub fn saved_payloads(&self) -> Result<Vec<serde_json::Value>, CollaboratorError> {
        Ok(self.payloads.read().map_err(poisoned)?.clone())
    }

    /// Make every following call fail with `error` until [`recover`](Self::recover).
    pub fn fail_with(&self, error: CollaboratorError) -> Result<(), CollaboratorError> {
        *self.failure.write().map_err(poisoned)? = Some(error);
        Ok(())
    }

    pub fn recover(&self) -> Result<(), CollaboratorError> {
        *self.failure.write().map_err(poisoned)? = None;
        Ok(())
    }

    async fn enter(&self) -> Result<(), CollaboratorError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.failure.read().map_err(poisoned)?.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProductCatalog for InMemoryCatalog {
    async fn fetch_product(&self, id: ProductId) -> Result<ProductRecord, CollaboratorError> {
        self.enter().await?;
        self.product(id)?
            .ok_or_else(|| CollaboratorError::NotFound(format!("product {id} not found")))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CollaboratorError> {
        self.enter().await?;
        Ok(self.categories.read().map_err(poisoned)?.clone())
    }

    async fn save_product(&self, request: SaveProductRequest) -> Result<ProductRecord, CollaboratorError> {
        self.enter().await?;

        let payload =
            serde_json::to_value(&request).map_err(|e| CollaboratorError::Rejected(e.to_string()))?;
        self.payloads.write().map_err(poisoned)?.push(payload);

        let mut products = self.products.write().map_err(poisoned)?;
        let id = match request.product_id {
            Some(id) if products.contains_key(&id) => id,
            Some(id) => return Err(CollaboratorError::NotFound(format!("product {id} not found"))),
            None => ProductId::new(),
        };

        let record = ProductRecord {
            id,
            name: request.name,
            description: request.description,
            image_url: request.image_url,
            base_price: request.base_price,
            category_id: Some(request.category_id),
            options: request.options.iter().map(assign_axis_ids).collect(),
            variants: request.variants.into_iter().map(assign_variant_id).collect(),
        };
        products.insert(id, record.clone());
        Ok(record)
    }
}

fn assign_axis_ids(axis: &OptionAxis) -> OptionAxis {
    let values = axis
        .values()
        .iter()
        .cloned()
        .map(|mut value: OptionValue| {
            value.id.get_or_insert_with(OptionValueId::new);
            value
        })
        .collect();
    OptionAxis::with_values(axis.name, Some(axis.id.unwrap_or_else(OptionAxisId::new)), values)
}

fn assign_variant_id(mut variant: Variant) -> Variant {
    variant.id.get_or_insert_with(VariantId::new);
    variant
}

/// Image store that hands out predictable URLs.
#[derive(Debug)]
pub struct InMemoryImageStore {
    base_url: String,
    uploads: RwLock<Vec<ImageUpload>>,
    failure: RwLock<Option<CollaboratorError>>,
}

impl Default for InMemoryImageStore {
    fn default() -> Self {
        Self::new("https://images.local")
    }
}

impl InMemoryImageStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            uploads: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
        }
    }

    pub fn upload_count(&self) -> Result<usize, CollaboratorError> {
        Ok(self.uploads.read().map_err(poisoned)?.len())
    }

    pub fn fail_with(&self, error: CollaboratorError) -> Result<(), CollaboratorError> {
        *self.failure.write().map_err(poisoned)? = Some(error);
        Ok(())
    }

    pub fn recover(&self) -> Result<(), CollaboratorError> {
        *self.failure.write().map_err(poisoned)? = None;
        Ok(())
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, CollaboratorError> {
        if let Some(err) = self.failure.read().map_err(poisoned)?.clone() {
            return Err(err);
        }
        if image.bytes.is_empty() {
            return Err(CollaboratorError::Rejected(format!("{} is empty", image.file_name)));
        }

        let mut uploads = self.uploads.write().map_err(poisoned)?;
        let url = format!("{}/{}/{}", self.base_url, uploads.len() + 1, image.file_name);
        uploads.push(image);
        Ok(url)
    }
}
