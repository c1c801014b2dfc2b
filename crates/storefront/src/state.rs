//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::services::CartStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is read-only
/// after startup; the cart sits behind a mutex so each command handler runs
/// its mutation and persistence to completion before the next one starts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Catalog,
    cart: Mutex<CartStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Products loaded at startup (possibly empty)
    /// * `cart` - Cart restored from its durable slot
    #[must_use]
    pub fn new(catalog: Catalog, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                cart: Mutex::new(cart),
            }),
        }
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get the cart store lock.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore> {
        &self.inner.cart
    }
}
