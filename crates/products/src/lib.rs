//! Products domain module: variant synthesis for the product editor.
//!
//! This crate keeps a product's sellable variant set consistent with its COLOR
//! and SIZE option lists, implemented purely as deterministic domain logic (no
//! IO, no HTTP, no storage).

pub mod draft;
pub mod option;
pub mod payload;
pub mod rename;
pub mod sku;
pub mod synthesis;
pub mod validation;
pub mod variant;

pub use draft::{ProductDraft, ValueAdded, ValueRenamed};
pub use option::{AxisName, DuplicateLabelWarning, LabelChange, OptionAxis, OptionValue};
pub use payload::{ProductRecord, SaveProductRequest};
pub use rename::{RenamePropagator, RenameReport};
pub use sku::{SkuFormat, SkuGenerator};
pub use synthesis::{SynthesisInput, SynthesisReport, VariantSynthesizer};
pub use validation::{ValidationError, ValidationPipeline, ValidationRule};
pub use variant::{Variant, VariantKey, VariantOptions};
