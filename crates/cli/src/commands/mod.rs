//! CLI command implementations.

pub mod cart;
pub mod catalog;

use thiserror::Error;

use vitrina_core::ProductId;
use vitrina_storefront::catalog::CatalogError;
use vitrina_storefront::config::ConfigError;
use vitrina_storefront::services::CheckoutError;
use vitrina_storefront::storage::StorageError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The product id is not in the catalog.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// Checkout attempted with nothing in the cart.
    #[error("the cart is empty; add at least one product before checking out")]
    EmptyCart,
}

impl From<CheckoutError> for CommandError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => Self::EmptyCart,
            CheckoutError::Storage(e) => Self::Storage(e),
        }
    }
}
