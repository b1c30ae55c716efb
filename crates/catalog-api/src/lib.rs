//! # catalog-api
//!
//! HTTP layer for the product catalog.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for listing, creating, updating and deleting products
//! - Server-rendered pages for browsing and creating products
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/products` | List products |
//! | POST | `/api/products` | Create product |
//! | GET | `/api/products/{id}` | Get product |
//! | PUT | `/api/products/{id}` | Update product |
//! | DELETE | `/api/products/{id}` | Delete product |
//! | GET | `/products` | Product list page |
//! | GET/POST | `/products/create` | Create product page |

pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
