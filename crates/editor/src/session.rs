//! One product edit session: seed, edit, submit.

use std::sync::Arc;

use tracing::{info, warn};

use storefront_core::{DomainError, ProductId};
use storefront_products::{AxisName, ProductDraft, ProductRecord, SaveProductRequest};

use crate::collaborator::{Category, CollaboratorError, ImageStore, ImageUpload, ProductCatalog};
use crate::config::EditorConfig;
use crate::error::{EditorError, EditorResult};

/// Owns the draft for the lifetime of the editor view.
///
/// At most one save is outstanding at a time. Edits stay allowed while a save
/// is pending; they are not part of the request already sent.
#[derive(Debug)]
pub struct EditSession<C> {
    catalog: Arc<C>,
    draft: ProductDraft,
    categories: Vec<Category>,
    in_flight: bool,
    config: EditorConfig,
}

/// A validated request on its way to the catalog.
///
/// Holds its own handle on the catalog so it can be awaited while the session
/// keeps accepting edits.
#[derive(Debug)]
pub struct PendingSave<C> {
    catalog: Arc<C>,
    request: SaveProductRequest,
}

impl<C: ProductCatalog> PendingSave<C> {
    pub fn request(&self) -> &SaveProductRequest {
        &self.request
    }

    pub async fn send(self) -> Result<ProductRecord, CollaboratorError> {
        self.catalog.save_product(self.request).await
    }
}

impl<C: ProductCatalog> EditSession<C> {
    /// Session for a product that does not exist yet.
    pub fn create(catalog: Arc<C>, config: EditorConfig) -> Self {
        Self {
            catalog,
            draft: ProductDraft::new(config.sku_generator()),
            categories: Vec::new(),
            in_flight: false,
            config,
        }
    }

    /// Fetch an existing product and seed the draft from it.
    pub async fn open(catalog: Arc<C>, product_id: ProductId, config: EditorConfig) -> EditorResult<Self> {
        let record = catalog.fetch_product(product_id).await?;
        let draft = ProductDraft::from_record(record, config.sku_generator())?;

        info!(
            product_id = %product_id,
            variants = draft.variants().len(),
            "edit session opened"
        );

        Ok(Self {
            catalog,
            draft,
            categories: Vec::new(),
            in_flight: false,
            config,
        })
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProductDraft {
        &mut self.draft
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Categories loaded by the last [`load_categories`](Self::load_categories).
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub async fn load_categories(&mut self) -> EditorResult<&[Category]> {
        self.categories = self.catalog.list_categories().await?;
        Ok(&self.categories)
    }

    /// Upload an image and attach its URL to an option value.
    ///
    /// The value is looked up before uploading; nothing changes if the
    /// upload fails.
    pub async fn upload_value_image<S>(
        &mut self,
        store: &S,
        axis: AxisName,
        index: usize,
        image: ImageUpload,
    ) -> EditorResult<String>
    where
        S: ImageStore + ?Sized,
    {
        if self.draft.axis(axis).get(index).is_none() {
            return Err(DomainError::not_found(format!("{axis} value at index {index}")).into());
        }

        let url = store.upload(image).await?;
        self.draft.add_value_image(axis, index, url.clone())?;
        Ok(url)
    }

    /// Upload the product's main image and set it on the draft.
    pub async fn upload_product_image<S>(&mut self, store: &S, image: ImageUpload) -> EditorResult<String>
    where
        S: ImageStore + ?Sized,
    {
        let url = store.upload(image).await?;
        self.draft.set_image_url(url.clone());
        Ok(url)
    }

    /// Validate the draft and hand out the request to send.
    ///
    /// A rejected draft leaves the session idle; no request is produced.
    pub fn begin_submit(&mut self) -> EditorResult<PendingSave<C>> {
        if self.in_flight {
            return Err(EditorError::SubmitInFlight);
        }

        let request = self.draft.submission()?;
        self.in_flight = true;

        info!(
            product_id = ?request.product_id,
            variants = request.variants.len(),
            new_variants = request.new_variant_count(),
            "submitting product"
        );

        Ok(PendingSave {
            catalog: Arc::clone(&self.catalog),
            request,
        })
    }

    /// Record the outcome of a [`PendingSave`].
    ///
    /// On success the draft adopts the ids the catalog assigned. On failure
    /// the draft is left exactly as it is and the collaborator error is
    /// returned.
    pub fn finish_submit(&mut self, outcome: Result<ProductRecord, CollaboratorError>) -> EditorResult<()> {
        if !self.in_flight {
            return Err(EditorError::NoSubmitInFlight);
        }
        self.in_flight = false;

        match outcome {
            Ok(saved) => {
                let adopted = self.draft.adopt_identities(&saved);
                info!(product_id = %saved.id, adopted, "product saved");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "product save failed");
                Err(err.into())
            }
        }
    }

    /// Validate, save and record the outcome in one go.
    pub async fn submit(&mut self) -> EditorResult<()> {
        let pending = self.begin_submit()?;
        let outcome = pending.send().await;
        self.finish_submit(outcome)
    }
}
