//! # Product Store
//!
//! In-memory holder of the product collection and the id counter.
//!
//! All state sits behind one `RwLock`, so assigning an id and appending the
//! product happen under the same write guard and concurrent adds never share
//! an id. Readers get cloned snapshots and never observe later mutation.

use crate::product::{Product, ProductDraft, ProductId};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug)]
struct StoreInner {
    products: Vec<Product>,
    next_id: u64,
}

impl Default for StoreInner {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            next_id: 1,
        }
    }
}

/// The authoritative product collection
#[derive(Debug, Default)]
pub struct ProductStore {
    inner: RwLock<StoreInner>,
}

impl ProductStore {
    /// Create an empty store; the first product gets id 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `drafts`, in order
    pub fn with_products(drafts: impl IntoIterator<Item = ProductDraft>) -> Self {
        let store = Self::new();
        store.seed(drafts);
        store
    }

    // No operation can leave the state half-written, so a poisoned guard is
    // still consistent.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every product, in insertion order
    pub fn list(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    /// Snapshot of a single product
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.read().products.iter().find(|p| p.id == id).cloned()
    }

    /// Store a product under the next id and return it
    pub fn add(&self, draft: ProductDraft) -> Product {
        let mut inner = self.write();

        let id = ProductId::new(inner.next_id);
        inner.next_id += 1;

        let product = Product::from_draft(id, draft);
        inner.products.push(product.clone());
        debug!(id = %id, name = %product.name, "product added");

        product
    }

    /// Add each draft in order, returning how many were stored
    pub fn seed(&self, drafts: impl IntoIterator<Item = ProductDraft>) -> usize {
        let mut added = 0;
        for draft in drafts {
            self.add(draft);
            added += 1;
        }
        added
    }

    /// Delete the product with `id`. Returns `false` if there was none.
    pub fn remove(&self, id: ProductId) -> bool {
        let mut inner = self.write();

        let Some(index) = inner.products.iter().position(|p| p.id == id) else {
            return false;
        };

        inner.products.remove(index);
        debug!(id = %id, "product removed");
        true
    }

    /// Overwrite name and price of the product with `id`.
    ///
    /// Returns the updated product, or `None` if there was none.
    pub fn update(&self, id: ProductId, draft: ProductDraft) -> Option<Product> {
        let mut inner = self.write();

        let product = inner.products.iter_mut().find(|p| p.id == id)?;
        product.apply(draft);
        debug!(id = %id, "product updated");

        Some(product.clone())
    }

    pub fn len(&self) -> usize {
        self.read().products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().products.is_empty()
    }
}
