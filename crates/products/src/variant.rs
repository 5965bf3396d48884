//! Sellable variants and their natural key.

use serde::{Deserialize, Serialize};

use storefront_core::VariantId;

use crate::option::AxisName;

/// Natural key of a variant: the `(color, size)` label pair.
///
/// No other identity is stable between client edits and server records, so
/// reconciliation is keyed on this pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    pub color: String,
    pub size: String,
}

impl VariantKey {
    pub fn new(color: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            size: size.into(),
        }
    }

    pub fn component(&self, axis: AxisName) -> &str {
        match axis {
            AxisName::Color => &self.color,
            AxisName::Size => &self.size,
        }
    }
}

impl core::fmt::Display for VariantKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} / {}", self.color, self.size)
    }
}

/// Axis-name → label mapping of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariantOptions {
    #[serde(rename = "COLOR", default)]
    pub color: String,
    #[serde(rename = "SIZE", default)]
    pub size: String,
}

impl VariantOptions {
    pub fn get(&self, axis: AxisName) -> &str {
        match axis {
            AxisName::Color => &self.color,
            AxisName::Size => &self.size,
        }
    }

    pub fn set(&mut self, axis: AxisName, label: impl Into<String>) {
        match axis {
            AxisName::Color => self.color = label.into(),
            AxisName::Size => self.size = label.into(),
        }
    }
}

impl From<VariantKey> for VariantOptions {
    fn from(key: VariantKey) -> Self {
        Self {
            color: key.color,
            size: key.size,
        }
    }
}

/// A sellable (color, size) combination of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    /// `None` until the save collaborator has persisted the row.
    pub id: Option<VariantId>,
    pub sku: String,
    pub price: f64,
    pub stock: i64,
    pub option_values: VariantOptions,
}

impl Variant {
    pub fn key(&self) -> VariantKey {
        VariantKey::new(
            self.option_values.color.clone(),
            self.option_values.size.clone(),
        )
    }

    pub fn matches(&self, key: &VariantKey) -> bool {
        self.option_values.color == key.color && self.option_values.size == key.size
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
