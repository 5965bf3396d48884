//! `storefront-core`: shared domain building blocks for the storefront catalog.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, OptionAxisId, OptionValueId, ProductId, VariantId};
