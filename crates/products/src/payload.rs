//! Shapes exchanged with the product fetch/save collaborators.

use serde::{Deserialize, Serialize};

use storefront_core::{CategoryId, ProductId};

use crate::option::OptionAxis;
use crate::variant::Variant;

/// A persisted product as returned by the catalog (fetch and save).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    pub base_price: f64,
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub options: Vec<OptionAxis>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// Payload handed to the save collaborator once a draft has passed validation.
///
/// Variants with `id: null` are new rows; every other variant carries the
/// identity it was seeded with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProductRequest {
    pub product_id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub base_price: f64,
    pub category_id: CategoryId,
    pub options: Vec<OptionAxis>,
    pub variants: Vec<Variant>,
}

impl SaveProductRequest {
    pub fn new_variant_count(&self) -> usize {
        self.variants.iter().filter(|v| v.is_new()).count()
    }
}
