//! # catalog-core
//!
//! Core types for the product catalog.
//!
//! This crate provides:
//! - `Product`, `ProductId` and `Price`
//! - `ProductInput` / `ProductDraft` and the field validation between them
//! - `ProductStore`, the in-memory collection and id counter
//! - `SeedCatalog` for loading starting products from TOML
//! - `CatalogError` for typed error handling
//!
//! ## Example
//!
//! ```rust
//! use catalog_core::{ProductInput, ProductStore};
//!
//! let store = ProductStore::new();
//!
//! let draft = ProductInput::new("Widget", 9.99).validate().unwrap();
//! let widget = store.add(draft);
//! assert_eq!(widget.id.get(), 1);
//!
//! assert!(store.remove(widget.id));
//! assert!(store.is_empty());
//! ```

pub mod error;
pub mod product;
pub mod seed;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use error::{CatalogError, CatalogResult};
pub use product::{Price, Product, ProductDraft, ProductId, ProductInput};
pub use seed::SeedCatalog;
pub use store::ProductStore;
pub use validation::{FieldViolation, ValidationErrors};
