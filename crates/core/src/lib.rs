//! Vitrina Core - Domain types for the storefront.
//!
//! This crate provides the types shared by every Vitrina component:
//! - `storefront` - HTTP storefront and cart persistence
//! - `cli` - Command-line cart and catalog tools
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! storage, no HTTP clients. Everything that touches the outside world lives
//! in `vitrina-storefront`.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, catalog products, the cart and
//!   checkout summaries

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
