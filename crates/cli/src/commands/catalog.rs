//! Catalog listing.

use std::fmt::Write;

use vitrina_storefront::catalog::{Catalog, CatalogError, load_catalog};
use vitrina_storefront::config::StorefrontConfig;

/// Load the configured catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be fetched or parsed.
pub async fn load(config: &StorefrontConfig) -> Result<Catalog, CatalogError> {
    tracing::info!(source = %config.catalog, "Loading catalog");
    load_catalog(&reqwest::Client::new(), &config.catalog).await
}

/// One product per line: id, name, price and description.
pub fn render(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return "No products available.".to_string();
    }

    let mut out = String::new();
    for product in catalog.products() {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>10}  {}",
            product.id,
            product.name,
            product.price.to_string(),
            product.description
        );
    }
    out.trim_end().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&Catalog::empty()), "No products available.");
    }

    #[test]
    fn test_render_lists_products() {
        let json = r#"[{"id": 1, "nombre": "Taza", "precio": 1500, "desc": "Cerámica", "imagen": ""}]"#;
        let catalog = Catalog::from_json(json.as_bytes()).unwrap();
        let out = render(&catalog);

        assert!(out.contains("Taza"));
        assert!(out.contains("$1500"));
        assert!(out.contains("Cerámica"));
        assert_eq!(out.lines().count(), 1);
    }
}
