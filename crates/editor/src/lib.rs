//! `storefront-editor`
//!
//! **Responsibility:** one product edit session around the variant engine.
//!
//! This crate provides:
//! - collaborator seams for product fetch/save, categories and image upload
//! - in-memory collaborators for tests and local development
//! - the edit session: seeding, draft edits, guarded submit
//! - environment-driven configuration

pub mod collaborator;
pub mod config;
pub mod error;
pub mod in_memory;
pub mod session;

pub use collaborator::{Category, CollaboratorError, ImageStore, ImageUpload, ProductCatalog};
pub use config::EditorConfig;
pub use error::{EditorError, EditorResult};
pub use in_memory::{InMemoryCatalog, InMemoryImageStore};
pub use session::{EditSession, PendingSave};
