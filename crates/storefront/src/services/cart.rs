//! Cart store: the session cart plus its durable slot.
//!
//! Every mutation is applied to the in-memory [`Cart`] first and then
//! written to the slot. A failed write is logged and returned, but the
//! in-memory cart keeps the change; the next successful write brings the
//! slot back in line.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use vitrina_core::{Cart, CartTotals, CheckoutSummary, Product, ProductId};

use crate::storage::{CART_STORAGE_KEY, KeyValueStore, StorageError};

/// Errors that can occur when checking out.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to buy.
    #[error("cart is empty")]
    EmptyCart,

    /// Clearing the stored cart failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// A confirmed purchase.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub summary: CheckoutSummary,
    pub placed_at: DateTime<Utc>,
}

/// The shopper's cart, backed by a [`KeyValueStore`] slot.
pub struct CartStore {
    cart: Cart,
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Restore the cart from the default slot.
    ///
    /// Never fails: a missing, unreadable or malformed slot yields an empty
    /// cart.
    #[must_use]
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Self {
        Self::restore_from(store, CART_STORAGE_KEY)
    }

    /// Restore the cart from the slot under `key`.
    #[must_use]
    pub fn restore_from(store: Arc<dyn KeyValueStore>, key: &str) -> Self {
        let cart = match store.get(key) {
            Ok(Some(raw)) => decode_cart(&raw).unwrap_or_else(|e| {
                warn!(key, error = %e, "Stored cart is malformed, starting empty");
                Cart::new()
            }),
            Ok(None) => {
                debug!(key, "No stored cart, starting empty");
                Cart::new()
            }
            Err(e) => {
                warn!(key, error = %e, "Failed to read stored cart, starting empty");
                Cart::new()
            }
        };

        Self {
            cart,
            store,
            key: key.to_string(),
        }
    }

    /// Current cart contents.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current totals.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    /// Add one unit of `product`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be persisted.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add(&mut self, product: &Product) -> Result<CartTotals, StorageError> {
        self.cart.add_item(product);
        debug!("Added item to cart");
        self.persist()?;
        Ok(self.totals())
    }

    /// Remove one unit of the product with `id`. Unknown ids are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be persisted.
    #[instrument(skip(self))]
    pub fn remove(&mut self, product_id: ProductId) -> Result<CartTotals, StorageError> {
        if !self.cart.remove_item(product_id) {
            debug!("Product not in cart, nothing to remove");
        }
        self.persist()?;
        Ok(self.totals())
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart could not be persisted.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<CartTotals, StorageError> {
        self.cart.clear();
        info!("Cart cleared");
        self.persist()?;
        Ok(CartTotals::ZERO)
    }

    /// Itemized summary for the confirmation step.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart is empty.
    pub fn checkout_summary(&self) -> Result<CheckoutSummary, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(self.cart.summary())
    }

    /// Confirm the purchase: drop the stored slot and empty the cart.
    ///
    /// An empty cart is rejected without touching any state.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if there is nothing to buy, or
    /// [`CheckoutError::Storage`] if the slot could not be removed (the cart
    /// is left intact in that case).
    #[instrument(skip(self))]
    pub fn confirm_checkout(&mut self) -> Result<CheckoutReceipt, CheckoutError> {
        let summary = self.checkout_summary()?;

        self.store.remove(&self.key).inspect_err(|e| {
            error!(error = %e, "Failed to remove stored cart at checkout");
        })?;
        self.cart.clear();

        info!(
            total = %summary.total,
            count = summary.count,
            "Checkout confirmed"
        );
        Ok(CheckoutReceipt {
            summary,
            placed_at: Utc::now(),
        })
    }

    /// Write the cart to its slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot could not be written.
    pub fn persist(&self) -> Result<(), StorageError> {
        let raw = encode_cart(&self.cart);
        self.store.set(&self.key, &raw).inspect_err(|e| {
            error!(key = %self.key, error = %e, "Failed to persist cart");
        })
    }
}

/// Serialize a cart to the slot format.
#[must_use]
pub fn encode_cart(cart: &Cart) -> String {
    // Serializing plain structs to a String cannot fail.
    serde_json::to_string(cart).unwrap_or_else(|_| "[]".to_string())
}

/// Parse the slot format. A JSON `null` is read as an empty cart.
///
/// # Errors
///
/// Returns an error if `raw` is not a valid serialized cart.
pub fn decode_cart(raw: &str) -> Result<Cart, serde_json::Error> {
    let cart: Option<Cart> = serde_json::from_str(raw)?;
    Ok(cart.unwrap_or_default())
}
