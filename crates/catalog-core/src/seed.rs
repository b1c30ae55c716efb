//! # Seed Catalog
//!
//! Optional starting products, read from a TOML file at startup:
//!
//! ```toml
//! [[products]]
//! name = "Widget"
//! price = 9.99
//! ```
//!
//! Entries go through the same validation as API input.

use crate::error::{CatalogError, CatalogResult};
use crate::product::{ProductDraft, ProductInput};
use serde::Deserialize;
use std::path::Path;

/// Parsed seed file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedCatalog {
    #[serde(default)]
    pub products: Vec<ProductInput>,
}

impl SeedCatalog {
    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> CatalogResult<Self> {
        toml::from_str(toml_str).map_err(|e| CatalogError::Seed(e.to_string()))
    }

    /// Read and parse a seed file
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Seed(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    /// Validate every entry. The first invalid entry fails the whole catalog.
    pub fn into_drafts(self) -> CatalogResult<Vec<ProductDraft>> {
        self.products
            .iter()
            .enumerate()
            .map(|(index, input)| {
                input
                    .validate()
                    .map_err(|e| CatalogError::Seed(format!("product #{}: {}", index + 1, e)))
            })
            .collect()
    }
}
