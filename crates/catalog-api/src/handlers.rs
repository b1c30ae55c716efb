//! # Request Handlers
//!
//! Axum request handlers for the JSON product API.
//! Each handler translates one request into one store call.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use catalog_core::{CatalogError, Product, ProductDraft, ProductId, ValidationErrors};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Update product response
#[derive(Debug, Serialize)]
pub struct UpdateProductResponse {
    pub updated: bool,
    pub product: Product,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Per-field messages for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
            errors: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_errors(mut self, errors: ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }
}

/// Error half of every fallible handler
pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn catalog_error_to_response(err: CatalogError) -> ApiError {
    let code = err.status_code();
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let response = match err.violations() {
        Some(errors) => ErrorResponse::new("One or more validation errors occurred", code)
            .with_details(errors.to_string())
            .with_errors(errors.clone()),
        None => ErrorResponse::new(err.to_string(), code),
    };

    (status, Json(response))
}

/// Decode a product body into a draft.
///
/// Malformed JSON and wrong field types are reported through `ErrorResponse`
/// like any other invalid input.
fn draft_from_body(
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<ProductDraft, CatalogError> {
    let Json(body) =
        payload.map_err(|rejection| CatalogError::InvalidArgument(rejection.body_text()))?;
    ProductDraft::from_json(body)
}

fn not_found(id: ProductId) -> ApiError {
    warn!("Product not found: {}", id);
    catalog_error_to_response(CatalogError::NotFound { id })
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "product-catalog",
        "version": env!("CARGO_PKG_VERSION"),
        "products": state.catalog.len()
    }))
}

/// List every product, in insertion order
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.list())
}

/// Get single product
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
) -> Result<Json<Product>, ApiError> {
    let id = ProductId::new(product_id);
    state.catalog.get(id).map(Json).ok_or_else(|| not_found(id))
}

/// Create a product. Any `id` in the body is ignored.
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = draft_from_body(payload).map_err(|e| {
        warn!("Rejected product: {}", e);
        catalog_error_to_response(e)
    })?;

    let product = state.catalog.add(draft);
    info!("Created product {}: {}", product.id, product.name);

    let location = format!("/api/products/{}", product.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(product)))
}

/// Replace name and price of an existing product
#[instrument(skip(state, payload))]
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpdateProductResponse>, ApiError> {
    let id = ProductId::new(product_id);

    let draft = draft_from_body(payload).map_err(|e| {
        warn!("Rejected update for product {}: {}", id, e);
        catalog_error_to_response(e)
    })?;

    let product = state.catalog.update(id, draft).ok_or_else(|| not_found(id))?;
    info!("Updated product {}", product.id);

    Ok(Json(UpdateProductResponse {
        updated: true,
        product,
    }))
}

/// Delete a product
#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    let id = ProductId::new(product_id);

    if !state.catalog.remove(id) {
        return Err(not_found(id));
    }

    info!("Deleted product {}", id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::FieldViolation;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
        assert!(err.errors.is_none());
    }

    #[test]
    fn test_not_found_conversion() {
        let (status, Json(body)) = catalog_error_to_response(CatalogError::NotFound {
            id: ProductId::new(3),
        });
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Product not found: 3");
    }

    #[test]
    fn test_validation_conversion_lists_fields() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldViolation::new("Price", "Price is required"));

        let (status, Json(body)) = catalog_error_to_response(CatalogError::Validation(errors));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["errors"]["Price"][0], "Price is required");
        assert_eq!(json["code"], 400);
    }

    #[test]
    fn test_invalid_argument_conversion() {
        let (status, Json(body)) =
            catalog_error_to_response(CatalogError::InvalidArgument("product payload is required".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.details.is_none());
    }
}
