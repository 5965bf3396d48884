//! Variant synthesis: keeps the variant set equal to COLOR × SIZE.
//!
//! Reconciliation is keyed on the natural key `(color, size)`, never on list
//! positions, so reordering values on either axis cannot re-associate a
//! persisted variant with the wrong combination.

use std::collections::HashMap;

use crate::option::OptionAxis;
use crate::sku::SkuGenerator;
use crate::variant::{Variant, VariantKey};

/// Counts describing one synthesis pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    pub retained: usize,
    pub created: usize,
    pub dropped: usize,
}

impl SynthesisReport {
    pub fn is_unchanged(&self) -> bool {
        self.created == 0 && self.dropped == 0
    }
}

/// Inputs of one synthesis pass.
#[derive(Debug, Clone, Copy)]
pub struct SynthesisInput<'a> {
    pub product_name: &'a str,
    /// Price given to newly created variants (snapshot; existing rows keep theirs).
    pub base_price: f64,
    pub color: &'a OptionAxis,
    pub size: &'a OptionAxis,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VariantSynthesizer {
    skus: SkuGenerator,
}

impl VariantSynthesizer {
    pub fn new(skus: SkuGenerator) -> Self {
        Self { skus }
    }

    /// Cartesian product of the synthesis labels, color-major, size-minor.
    ///
    /// Empty as soon as either axis has no non-blank value.
    pub fn target_keys(color: &OptionAxis, size: &OptionAxis) -> Vec<VariantKey> {
        let colors = color.synthesis_labels();
        let sizes = size.synthesis_labels();

        let mut keys = Vec::with_capacity(colors.len() * sizes.len());
        for c in &colors {
            for s in &sizes {
                keys.push(VariantKey::new(*c, *s));
            }
        }
        keys
    }

    /// Reconcile `existing` against the current axes.
    ///
    /// Variants whose key is still wanted are carried over untouched (id, sku,
    /// price, stock); the rest are dropped. Missing keys get a fresh variant
    /// with no id, the snapshotted base price and zero stock.
    pub fn synthesize(
        &self,
        input: SynthesisInput<'_>,
        existing: Vec<Variant>,
    ) -> (Vec<Variant>, SynthesisReport) {
        let targets = Self::target_keys(input.color, input.size);
        let mut report = SynthesisReport::default();

        let mut slots: HashMap<VariantKey, Option<Variant>> =
            targets.iter().cloned().map(|key| (key, None)).collect();

        for variant in existing {
            match slots.get_mut(&variant.key()) {
                // First occurrence of a wanted key wins.
                Some(slot) if slot.is_none() => *slot = Some(variant),
                _ => report.dropped += 1,
            }
        }

        let variants = targets
            .into_iter()
            .map(|key| match slots.remove(&key).flatten() {
                Some(variant) => {
                    report.retained += 1;
                    variant
                }
                None => {
                    report.created += 1;
                    self.new_variant(input.product_name, input.base_price, key)
                }
            })
            .collect();

        tracing::debug!(
            retained = report.retained,
            created = report.created,
            dropped = report.dropped,
            "variants synthesized"
        );

        (variants, report)
    }

    fn new_variant(&self, product_name: &str, base_price: f64, key: VariantKey) -> Variant {
        Variant {
            id: None,
            sku: self.skus.generate(product_name, &key.color, &key.size),
            price: base_price,
            stock: 0,
            option_values: key.into(),
        }
    }
}
