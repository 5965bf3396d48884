//! In-place label edits: re-key affected variants instead of delete + insert.

use crate::option::{LabelChange, OptionAxis};
use crate::sku::SkuGenerator;
use crate::variant::Variant;

/// Result of propagating one label change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameReport {
    /// Variants whose option value and SKU were rewritten.
    pub rekeyed: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenamePropagator {
    skus: SkuGenerator,
}

impl RenamePropagator {
    pub fn new(skus: SkuGenerator) -> Self {
        Self { skus }
    }

    /// Rewrite every variant that referenced `change.old_label` on the renamed axis.
    ///
    /// `axis` is the axis *after* the rename. Only the option value and SKU of a
    /// variant change; id, price and stock are left alone, and no variant is
    /// created or removed. When another entry of the axis still carries the old
    /// label exactly, the variants stay with that entry.
    pub fn propagate(
        &self,
        product_name: &str,
        axis: &OptionAxis,
        change: &LabelChange,
        variants: &mut [Variant],
    ) -> RenameReport {
        let mut report = RenameReport::default();
        if change.is_noop() || axis.contains_label(&change.old_label) {
            return report;
        }

        for variant in variants
            .iter_mut()
            .filter(|v| v.option_values.get(change.axis) == change.old_label)
        {
            variant.option_values.set(change.axis, change.new_label.as_str());
            variant.sku = self.skus.generate(
                product_name,
                &variant.option_values.color,
                &variant.option_values.size,
            );
            report.rekeyed += 1;
        }

        tracing::debug!(
            axis = %change.axis,
            old = %change.old_label,
            new = %change.new_label,
            rekeyed = report.rekeyed,
            "label change propagated"
        );

        report
    }
}
