//! # Catalog Error Types
//!
//! Typed error handling for the product catalog.
//! Store lookups report absence through `Option`/`bool`; the boundary layers
//! turn those into `CatalogError::NotFound` when a caller needs an error.

use crate::product::ProductId;
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Core error type for all catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Missing or null payload where a product was expected
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Input failed one or more field constraints
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// No product with the requested id
    #[error("Product not found: {id}")]
    NotFound { id: ProductId },

    /// Configuration errors (bad env values, unparseable address)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Seed catalog could not be read or contained invalid entries
    #[error("Seed catalog error: {0}")]
    Seed(String),
}

impl CatalogError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::InvalidArgument(_) => 400,
            CatalogError::Validation(_) => 400,
            CatalogError::NotFound { .. } => 404,
            CatalogError::Configuration(_) => 500,
            CatalogError::Seed(_) => 500,
        }
    }

    /// Per-field violations, if this is a validation error
    pub fn violations(&self) -> Option<&ValidationErrors> {
        match self {
            CatalogError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        CatalogError::Validation(errors)
    }
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
