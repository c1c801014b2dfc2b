//! Core types for Vitrina.
//!
//! This module provides the product and cart model together with the
//! type-safe wrappers they are built from.

pub mod cart;
pub mod checkout;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{Cart, CartError, CartTotals, LineItem};
pub use checkout::{CheckoutSummary, SummaryLine};
pub use id::{ParseProductIdError, ProductId};
pub use price::{Price, PriceError, format_amount};
pub use product::Product;
