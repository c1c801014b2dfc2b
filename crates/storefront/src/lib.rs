//! Vitrina Storefront library.
//!
//! This crate provides the storefront functionality as a library, allowing
//! it to be tested and reused by the CLI.
//!
//! # Modules
//!
//! - [`catalog`] - Load the product catalog from a URL or file
//! - [`storage`] - Durable key-value slots for the cart
//! - [`services`] - Cart store: mutations, totals, persistence, checkout
//! - [`routes`] - HTTP handlers and HTMX fragments

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the storefront router with request tracing.
pub fn router(state: AppState) -> Router {
    routes::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
