//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product cards + cart panel
//! GET  /health                 - Health check
//! GET  /products.json          - Loaded catalog (catalog JSON shape)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart panel
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add one unit (form: product_id)
//! POST /cart/remove            - Remove one unit (form: product_id)
//! POST /cart/clear             - Empty the cart
//!
//! # Checkout
//! GET  /checkout               - Itemized summary (422 if cart is empty)
//! POST /checkout               - Confirm purchase (422 if cart is empty)
//! ```

pub mod cart;
pub mod checkout;
pub mod notice;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/health", get(health))
        .route("/products.json", get(products::catalog_json))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::summary).post(checkout::confirm))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
