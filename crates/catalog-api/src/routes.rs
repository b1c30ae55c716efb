//! # Routes
//!
//! Axum router configuration for the catalog.

use crate::handlers;
use crate::pages;
use crate::state::AppState;
use axum::{response::Redirect, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - JSON API:
///   - GET    /api/products - List products
///   - POST   /api/products - Create product
///   - GET    /api/products/{id} - Get product
///   - PUT    /api/products/{id} - Update product
///   - DELETE /api/products/{id} - Delete product
///
/// - Pages:
///   - GET  /products - Product list
///   - GET  /products/create - Create form
///   - POST /products/create - Submit create form
///
/// - GET /health - Health check
pub fn create_router(state: AppState) -> Router {
    // CORS only matters for the JSON API; pages are same-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/api/products",
            get(handlers::list_products).post(handlers::create_product),
        )
        .route(
            "/api/products/{product_id}",
            get(handlers::get_product)
                .put(handlers::update_product)
                .delete(handlers::delete_product),
        )
        .layer(cors);

    let page_routes = Router::new()
        .route("/", get(|| async { Redirect::to("/products") }))
        .route("/products", get(pages::index))
        .route(
            "/products/create",
            get(pages::create_form).post(pages::create_submit),
        );

    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_routes)
        .merge(page_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
