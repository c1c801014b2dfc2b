//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `cart` - Cart mutations, totals, persistence and checkout

pub mod cart;

pub use cart::{CartStore, CheckoutError, CheckoutReceipt};
