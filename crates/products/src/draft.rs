//! The product draft edited during one session.
//!
//! Every mutation goes through this type so that the variant set stays in step
//! with the two axes: shape changes (add/remove a value) resynthesize, label
//! edits propagate, and base-field edits touch nothing else.

use std::collections::HashMap;

use storefront_core::{CategoryId, DomainError, DomainResult, ProductId};

use crate::option::{AxisName, DuplicateLabelWarning, LabelChange, OptionAxis, OptionValue};
use crate::payload::{ProductRecord, SaveProductRequest};
use crate::rename::{RenamePropagator, RenameReport};
use crate::sku::SkuGenerator;
use crate::synthesis::{SynthesisInput, SynthesisReport, VariantSynthesizer};
use crate::validation::{ValidationError, ValidationPipeline};
use crate::variant::{Variant, VariantKey};

/// Result of adding a value to an axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueAdded {
    pub warning: Option<DuplicateLabelWarning>,
    pub synthesis: SynthesisReport,
}

/// Result of renaming a value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRenamed {
    pub change: LabelChange,
    pub propagation: RenameReport,
}

impl ValueRenamed {
    pub fn warning(&self) -> Option<&DuplicateLabelWarning> {
        self.change.warning.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    product_id: Option<ProductId>,
    name: String,
    description: String,
    image_url: String,
    category_id: Option<CategoryId>,
    base_price: f64,
    color: OptionAxis,
    size: OptionAxis,
    variants: Vec<Variant>,
    skus: SkuGenerator,
}

impl ProductDraft {
    /// An empty draft for a product that does not exist yet.
    pub fn new(skus: SkuGenerator) -> Self {
        Self {
            product_id: None,
            name: String::new(),
            description: String::new(),
            image_url: String::new(),
            category_id: None,
            base_price: 0.0,
            color: OptionAxis::new(AxisName::Color),
            size: OptionAxis::new(AxisName::Size),
            variants: Vec::new(),
            skus,
        }
    }

    /// Seed a draft from a fetched product.
    ///
    /// Variants are taken as-is; they are reconciled on the first shape change.
    /// A missing axis starts out empty.
    pub fn from_record(record: ProductRecord, skus: SkuGenerator) -> DomainResult<Self> {
        let mut color = None;
        let mut size = None;

        for axis in record.options {
            let slot = match axis.name {
                AxisName::Color => &mut color,
                AxisName::Size => &mut size,
            };
            if slot.is_some() {
                return Err(DomainError::invariant(format!(
                    "product {} has more than one {} axis",
                    record.id, axis.name
                )));
            }
            *slot = Some(axis);
        }

        Ok(Self {
            product_id: Some(record.id),
            name: record.name,
            description: record.description,
            image_url: record.image_url,
            category_id: record.category_id,
            base_price: record.base_price,
            color: color.unwrap_or_else(|| OptionAxis::new(AxisName::Color)),
            size: size.unwrap_or_else(|| OptionAxis::new(AxisName::Size)),
            variants: record.variants,
            skus,
        })
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.product_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn category_id(&self) -> Option<CategoryId> {
        self.category_id
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn axis(&self, axis: AxisName) -> &OptionAxis {
        match axis {
            AxisName::Color => &self.color,
            AxisName::Size => &self.size,
        }
    }

    /// Both axes, COLOR first.
    pub fn axes(&self) -> [&OptionAxis; 2] {
        [&self.color, &self.size]
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn variant(&self, key: &VariantKey) -> Option<&Variant> {
        self.variants.iter().find(|v| v.matches(key))
    }

    pub fn sku_generator(&self) -> SkuGenerator {
        self.skus
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_image_url(&mut self, url: impl Into<String>) {
        self.image_url = url.into();
    }

    pub fn set_category(&mut self, category_id: Option<CategoryId>) {
        self.category_id = category_id;
    }

    /// Only variants synthesized from now on pick up the new price.
    pub fn set_base_price(&mut self, price: f64) {
        self.base_price = price;
    }

    pub fn add_value(&mut self, axis: AxisName, label: impl Into<String>) -> ValueAdded {
        let warning = self.axis_mut(axis).add(label);
        let synthesis = self.resynthesize();
        ValueAdded { warning, synthesis }
    }

    pub fn remove_value(&mut self, axis: AxisName, index: usize) -> DomainResult<(OptionValue, SynthesisReport)> {
        let removed = self.axis_mut(axis).remove(index)?;
        let synthesis = self.resynthesize();
        Ok((removed, synthesis))
    }

    /// Rename a value and re-key the variants that referenced its old label.
    ///
    /// Meant to be called on every keystroke. Never creates or removes variants.
    pub fn rename_value(
        &mut self,
        axis: AxisName,
        index: usize,
        label: impl Into<String>,
    ) -> DomainResult<ValueRenamed> {
        let change = self.axis_mut(axis).rename(index, label)?;
        let renamed = match axis {
            AxisName::Color => &self.color,
            AxisName::Size => &self.size,
        };
        let propagation = RenamePropagator::new(self.skus).propagate(
            &self.name,
            renamed,
            &change,
            &mut self.variants,
        );
        Ok(ValueRenamed { change, propagation })
    }

    pub fn add_value_image(&mut self, axis: AxisName, index: usize, url: impl Into<String>) -> DomainResult<()> {
        self.axis_mut(axis).add_image(index, url)
    }

    pub fn remove_value_image(&mut self, axis: AxisName, index: usize, image: usize) -> DomainResult<String> {
        self.axis_mut(axis).remove_image(index, image)
    }

    /// Recompute the variant set from the current axes.
    pub fn resynthesize(&mut self) -> SynthesisReport {
        let existing = core::mem::take(&mut self.variants);
        let (variants, report) = VariantSynthesizer::new(self.skus).synthesize(
            SynthesisInput {
                product_name: &self.name,
                base_price: self.base_price,
                color: &self.color,
                size: &self.size,
            },
            existing,
        );
        self.variants = variants;
        report
    }

    pub fn set_variant_price(&mut self, key: &VariantKey, price: f64) -> DomainResult<()> {
        self.variant_mut(key)?.price = price;
        Ok(())
    }

    pub fn set_variant_stock(&mut self, key: &VariantKey, stock: i64) -> DomainResult<()> {
        self.variant_mut(key)?.stock = stock;
        Ok(())
    }

    /// Recompute every SKU from the current product name. Returns how many changed.
    pub fn regenerate_skus(&mut self) -> usize {
        let mut changed = 0;
        for variant in &mut self.variants {
            let sku = self.skus.generate(
                &self.name,
                &variant.option_values.color,
                &variant.option_values.size,
            );
            if variant.sku != sku {
                variant.sku = sku;
                changed += 1;
            }
        }
        changed
    }

    /// Take over the identities a successful save assigned.
    ///
    /// Edits made while the save was in flight are kept: only rows that are
    /// still unsaved and still match a saved row (variants by natural key,
    /// option values by label) receive the server id. Returns how many
    /// variants were adopted.
    pub fn adopt_identities(&mut self, saved: &ProductRecord) -> usize {
        self.product_id = Some(saved.id);
        for axis in &saved.options {
            self.axis_mut(axis.name).adopt_ids(axis);
        }

        let saved_ids: HashMap<VariantKey, _> = saved
            .variants
            .iter()
            .filter_map(|v| v.id.map(|id| (v.key(), id)))
            .collect();

        let mut adopted = 0;
        for variant in self.variants.iter_mut().filter(|v| v.is_new()) {
            if let Some(id) = saved_ids.get(&variant.key()) {
                variant.id = Some(*id);
                adopted += 1;
            }
        }
        adopted
    }

    /// Run the validation pipeline and build the save payload.
    pub fn submission(&self) -> Result<SaveProductRequest, ValidationError> {
        ValidationPipeline::prepare(self)
    }

    fn axis_mut(&mut self, axis: AxisName) -> &mut OptionAxis {
        match axis {
            AxisName::Color => &mut self.color,
            AxisName::Size => &mut self.size,
        }
    }

    fn variant_mut(&mut self, key: &VariantKey) -> DomainResult<&mut Variant> {
        self.variants
            .iter_mut()
            .find(|v| v.matches(key))
            .ok_or_else(|| DomainError::not_found(format!("variant {key}")))
    }
}
