//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Json, extract::State, response::IntoResponse};
use tracing::instrument;

use vitrina_core::Product;

use crate::routes::cart::CartView;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Storefront page: product cards plus the cart panel.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub products: Vec<ProductView>,
    pub cart: CartView,
}

/// Display the storefront page.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let products = state
        .catalog()
        .products()
        .iter()
        .map(ProductView::from)
        .collect();
    let cart = CartView::from(state.cart().lock().await.cart());

    IndexTemplate { products, cart }
}

/// Return the loaded catalog in its source JSON shape.
pub async fn catalog_json(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().products().to_vec())
}
