//! Cart route handlers.
//!
//! Cart operations return HTMX fragments: the cart panel after every
//! mutation, with an `HX-Trigger` header that refreshes the count badge and
//! optionally raises a notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use vitrina_core::{Cart, LineItem, ProductId, format_amount};

use crate::error::{AppError, Result};
use crate::routes::notice::{CART_UPDATED, Notice};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::new())
    }
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            items: cart.lines().iter().map(CartItemView::from).collect(),
            total: format_amount(totals.total),
            item_count: totals.count,
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.product.id.to_string(),
            name: line.product.name.clone(),
            quantity: line.quantity,
            price: line.product.price.to_string(),
            line_price: format_amount(line.line_total()),
        }
    }
}

/// Form naming a single product.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display the cart panel.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    let cart = CartView::from(state.cart().lock().await.cart());
    CartPanelTemplate { cart }
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let count = state.cart().lock().await.totals().count;
    CartCountTemplate { count }
}

/// Add one unit of a catalog product.
///
/// Unknown product ids are rejected with 404; the catalog is the only source
/// of products that may enter the cart.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let mut store = state.cart().lock().await;
    store.add(product)?;
    let cart = CartView::from(store.cart());

    let notice = Notice::product_added(product);
    Ok((
        AppendHeaders([("HX-Trigger", notice.cart_updated_header())]),
        CartPanelTemplate { cart },
    )
        .into_response())
}

/// Remove one unit of a product. Products not in the cart are ignored.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let mut store = state.cart().lock().await;
    store.remove(form.product_id)?;
    let cart = CartView::from(store.cart());

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED)]),
        CartPanelTemplate { cart },
    )
        .into_response())
}

/// Empty the cart. The page asks for confirmation before posting here.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Result<Response> {
    let mut store = state.cart().lock().await;
    store.clear()?;

    Ok((
        AppendHeaders([("HX-Trigger", Notice::cart_cleared().cart_updated_header())]),
        CartPanelTemplate {
            cart: CartView::empty(),
        },
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use vitrina_core::{Price, Product};

    use super::*;

    #[test]
    fn test_cart_view_formats_amounts() {
        let mut cart = Cart::new();
        let product = Product {
            id: ProductId::new(9),
            name: "Yerba".to_string(),
            price: Price::new(Decimal::new(1250, 2)).unwrap_or(Price::ZERO),
            description: String::new(),
            image: String::new(),
        };
        cart.add_item(&product);
        cart.add_item(&product);

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.total, "$25");
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].price, "$12.5");
        assert_eq!(view.items[0].line_price, "$25");
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::empty();
        assert!(view.items.is_empty());
        assert_eq!(view.total, "$0");
        assert_eq!(view.item_count, 0);
    }
}
