//! Submit-time validation of a product draft.
//!
//! The pipeline runs its rules in a fixed order and stops at the first
//! violation, so the caller always gets exactly one error:
//!
//! 1. required base fields (name, description, image, category, base price)
//! 2. option axes (each has a non-blank value, no duplicate labels)
//! 3. every variant (sku, price, stock, option values, unique natural key)
//! 4. variant presence (at least one, and one per COLOR × SIZE combination)

use std::collections::HashSet;

use thiserror::Error;

use storefront_core::DomainError;

use crate::draft::ProductDraft;
use crate::option::{AxisName, OptionAxis};
use crate::payload::SaveProductRequest;
use crate::synthesis::VariantSynthesizer;
use crate::variant::{Variant, VariantKey};

/// Rule categories, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationRule {
    RequiredFields,
    OptionAxes,
    Variants,
    VariantPresence,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("base price must be a number greater than zero, got {price}")]
    InvalidBasePrice { price: f64 },

    #[error("{axis} needs at least one value")]
    EmptyAxis { axis: AxisName },

    #[error("{axis} value \"{label}\" is listed more than once")]
    DuplicateOptionValue { axis: AxisName, label: String },

    #[error("variant #{position} ({key}): {reason}")]
    InvalidVariant {
        position: usize,
        key: String,
        reason: String,
    },

    #[error("product has no variants")]
    NoVariants,

    #[error("combination {key} has no variant")]
    MissingVariant { key: String },
}

impl ValidationError {
    pub fn rule(&self) -> ValidationRule {
        match self {
            ValidationError::MissingField { .. } | ValidationError::InvalidBasePrice { .. } => {
                ValidationRule::RequiredFields
            }
            ValidationError::EmptyAxis { .. } | ValidationError::DuplicateOptionValue { .. } => {
                ValidationRule::OptionAxes
            }
            ValidationError::InvalidVariant { .. } => ValidationRule::Variants,
            ValidationError::NoVariants | ValidationError::MissingVariant { .. } => {
                ValidationRule::VariantPresence
            }
        }
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

type Check = fn(&ProductDraft) -> Result<(), ValidationError>;

/// Ordered, fail-fast validation run right before the save handoff.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationPipeline;

impl ValidationPipeline {
    const CHECKS: [Check; 4] = [
        check_required_fields,
        check_option_axes,
        check_variants,
        check_variant_presence,
    ];

    pub fn validate(draft: &ProductDraft) -> Result<(), ValidationError> {
        for check in Self::CHECKS {
            if let Err(err) = check(draft) {
                tracing::warn!(rule = ?err.rule(), error = %err, "product draft rejected");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Validate and build the save payload.
    ///
    /// Blank option values are an editing artefact and are left out of the payload.
    pub fn prepare(draft: &ProductDraft) -> Result<SaveProductRequest, ValidationError> {
        Self::validate(draft)?;

        let category_id = draft
            .category_id()
            .ok_or(ValidationError::MissingField { field: "category" })?;

        Ok(SaveProductRequest {
            product_id: draft.product_id(),
            name: draft.name().to_string(),
            description: draft.description().to_string(),
            image_url: draft.image_url().to_string(),
            base_price: draft.base_price(),
            category_id,
            options: draft.axes().map(OptionAxis::without_blanks).to_vec(),
            variants: draft.variants().to_vec(),
        })
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn check_required_fields(draft: &ProductDraft) -> Result<(), ValidationError> {
    let fields = [
        ("name", draft.name()),
        ("description", draft.description()),
        ("image", draft.image_url()),
    ];
    if let Some(&(field, _)) = fields.iter().find(|(_, value)| is_blank(value)) {
        return Err(ValidationError::MissingField { field });
    }
    if draft.category_id().is_none() {
        return Err(ValidationError::MissingField { field: "category" });
    }

    let price = draft.base_price();
    if !price.is_finite() || price <= 0.0 {
        return Err(ValidationError::InvalidBasePrice { price });
    }
    Ok(())
}

fn check_option_axes(draft: &ProductDraft) -> Result<(), ValidationError> {
    for axis in draft.axes() {
        if !axis.has_synthesis_labels() {
            return Err(ValidationError::EmptyAxis { axis: axis.name });
        }
    }
    for axis in draft.axes() {
        if let Some(dup) = axis.first_duplicate() {
            return Err(ValidationError::DuplicateOptionValue {
                axis: dup.axis,
                label: dup.label.trim().to_string(),
            });
        }
    }
    Ok(())
}

fn check_variants(draft: &ProductDraft) -> Result<(), ValidationError> {
    let [color, size] = draft.axes();
    let mut seen = HashSet::new();

    for (i, variant) in draft.variants().iter().enumerate() {
        let reject = |reason: String| ValidationError::InvalidVariant {
            position: i + 1,
            key: variant.key().to_string(),
            reason,
        };

        if let Some(reason) = variant_problem(variant) {
            return Err(reject(reason));
        }
        for (axis, label) in [
            (color, &variant.option_values.color),
            (size, &variant.option_values.size),
        ] {
            if !axis.contains_label(label) {
                return Err(reject(format!("{} value \"{label}\" does not exist", axis.name)));
            }
        }
        if !seen.insert(variant.key()) {
            return Err(reject("combination is listed more than once".to_string()));
        }
    }
    Ok(())
}

fn variant_problem(variant: &Variant) -> Option<String> {
    if is_blank(&variant.sku) {
        return Some("sku is required".to_string());
    }
    if !variant.price.is_finite() || variant.price < 0.0 {
        return Some(format!("price must be a non-negative number, got {}", variant.price));
    }
    if variant.stock < 0 {
        return Some(format!("stock must be a non-negative integer, got {}", variant.stock));
    }
    for axis in AxisName::ALL {
        if is_blank(variant.option_values.get(axis)) {
            return Some(format!("{axis} value is required"));
        }
    }
    None
}

/// Renames never create variants, so a value named after it was added (or a
/// seeded product) can leave combinations uncovered until the next resynthesis.
fn check_variant_presence(draft: &ProductDraft) -> Result<(), ValidationError> {
    if draft.variants().is_empty() {
        return Err(ValidationError::NoVariants);
    }

    let [color, size] = draft.axes();
    let present: HashSet<VariantKey> = draft.variants().iter().map(Variant::key).collect();
    match VariantSynthesizer::target_keys(color, size)
        .into_iter()
        .find(|key| !present.contains(key))
    {
        Some(key) => Err(ValidationError::MissingVariant { key: key.to_string() }),
        None => Ok(()),
    }
}
