//! Product catalog loading.
//!
//! The catalog is a static JSON array of product records, fetched once at
//! startup from either an HTTP(S) URL or a local file:
//!
//! ```json
//! [
//!   {"id": 1, "nombre": "Taza", "precio": 1500, "desc": "Cerámica", "imagen": "img/taza.jpg"}
//! ]
//! ```
//!
//! Any failure (transport, non-success status, malformed body, negative or
//! out-of-range price, duplicate id) is reported as a [`CatalogError`]. Callers log it and
//! carry on with [`Catalog::empty`]; there is no retry.

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use vitrina_core::{Product, ProductId};

/// Errors that make the catalog unavailable.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog server answered with a non-success status.
    #[error("catalog request returned status {0}")]
    Status(reqwest::StatusCode),

    /// Reading the catalog file failed.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// The body is not a JSON array of valid products.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two records share an id.
    #[error("duplicate product id {0} in catalog")]
    DuplicateProduct(ProductId),
}

/// Where to load the catalog from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// An `http://` or `https://` URL.
    Remote(Url),
    /// A path on the local filesystem.
    File(PathBuf),
}

impl CatalogSource {
    /// Interpret `s` as a URL when it has an HTTP(S) scheme, otherwise as a
    /// file path.
    ///
    /// # Errors
    ///
    /// Returns an error if `s` looks like an HTTP(S) URL but does not parse.
    pub fn parse(s: &str) -> Result<Self, url::ParseError> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Remote(Url::parse(trimmed)?))
        } else {
            Ok(Self::File(PathBuf::from(trimmed)))
        }
    }
}

impl FromStr for CatalogSource {
    type Err = url::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The loaded product catalog, in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// A catalog with no products.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from products, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }
        Ok(Self { products, index })
    }

    /// Parse a catalog from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON and
    /// [`CatalogError::DuplicateProduct`] for repeated ids.
    pub fn from_json(body: &[u8]) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_slice(body)?;
        Self::new(products)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&i| self.products.get(i))
    }

    /// Products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Fetch and parse the catalog.
///
/// # Errors
///
/// Returns a [`CatalogError`] if the resource cannot be read or is not a
/// well-formed catalog.
#[instrument(skip(client, source), fields(source = %source))]
pub async fn load_catalog(
    client: &reqwest::Client,
    source: &CatalogSource,
) -> Result<Catalog, CatalogError> {
    let body = match source {
        CatalogSource::Remote(url) => {
            let response = client.get(url.clone()).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status(status));
            }
            response.bytes().await?.to_vec()
        }
        CatalogSource::File(path) => tokio::fs::read(path).await?,
    };

    let catalog = Catalog::from_json(&body)?;
    debug!(products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": 1, "nombre": "Taza", "precio": 1500, "desc": "Cerámica", "imagen": "img/taza.jpg"},
        {"id": 2, "nombre": "Mate", "precio": 2499.5, "desc": "Calabaza", "imagen": "img/mate.jpg"}
    ]"#;

    #[test]
    fn test_source_parse() {
        assert!(matches!(
            CatalogSource::parse("https://cdn.example.com/productos.json").unwrap(),
            CatalogSource::Remote(_)
        ));
        assert!(matches!(
            CatalogSource::parse("HTTP://example.com/p.json").unwrap(),
            CatalogSource::Remote(_)
        ));
        assert_eq!(
            CatalogSource::parse("data/productos.json").unwrap(),
            CatalogSource::File(PathBuf::from("data/productos.json"))
        );
        assert!(CatalogSource::parse("http://").is_err());
    }

    #[test]
    fn test_from_json_keeps_order_and_index() {
        let catalog = Catalog::from_json(CATALOG.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].name, "Taza");
        assert_eq!(catalog.get(ProductId::new(2)).unwrap().name, "Mate");
        assert!(catalog.get(ProductId::new(3)).is_none());
    }

    #[test]
    fn test_from_json_rejects_object() {
        let err = Catalog::from_json(br#"{"id": 1}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_from_json_rejects_negative_price() {
        let body = br#"[{"id": 1, "nombre": "x", "precio": -1, "desc": "", "imagen": ""}]"#;
        assert!(matches!(
            Catalog::from_json(body),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_price_above_max() {
        let body = br#"[{"id": 1, "nombre": "x", "precio": 50000000000000000000000000000, "desc": "", "imagen": ""}]"#;
        assert!(matches!(
            Catalog::from_json(body),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let body = br#"[
            {"id": 1, "nombre": "x", "precio": 1, "desc": "", "imagen": ""},
            {"id": 1, "nombre": "y", "precio": 2, "desc": "", "imagen": ""}
        ]"#;
        assert!(matches!(
            Catalog::from_json(body),
            Err(CatalogError::DuplicateProduct(id)) if id == ProductId::new(1)
        ));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("vitrina-catalog-{}.json", std::process::id()));
        tokio::fs::write(&path, CATALOG).await.unwrap();

        let catalog = load_catalog(&reqwest::Client::new(), &CatalogSource::File(path.clone()))
            .await
            .unwrap();
        let _ = tokio::fs::remove_file(&path).await;

        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let source = CatalogSource::File(PathBuf::from("/nonexistent/vitrina/productos.json"));
        let err = load_catalog(&reqwest::Client::new(), &source)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
