//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// An immutable catalog product.
///
/// Field names on the wire follow the catalog resource:
///
/// ```json
/// {"id": 1, "nombre": "Taza", "precio": 1500, "desc": "Cerámica", "imagen": "img/taza.jpg"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable identifier.
    pub id: ProductId,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Unit price.
    #[serde(rename = "precio")]
    pub price: Price,
    /// Short description shown on the product card.
    #[serde(rename = "desc")]
    pub description: String,
    /// Image reference (URL or path relative to the storefront).
    #[serde(rename = "imagen")]
    pub image: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_deserialize_catalog_record() {
        let json = r#"{"id": 3, "nombre": "Mate", "precio": 2499.5, "desc": "Calabaza", "imagen": "img/mate.png"}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.name, "Mate");
        assert_eq!(product.price.amount(), Decimal::new(24995, 1));
        assert_eq!(product.description, "Calabaza");
        assert_eq!(product.image, "img/mate.png");
    }

    #[test]
    fn test_missing_field_is_error() {
        let json = r#"{"id": 3, "nombre": "Mate", "precio": 10}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_serialize_uses_catalog_names() {
        let product = Product {
            id: ProductId::new(1),
            name: "Taza".to_string(),
            price: Price::from_units(1500),
            description: "Cerámica".to_string(),
            image: "img/taza.jpg".to_string(),
        };
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["nombre"], "Taza");
        assert_eq!(value["desc"], "Cerámica");
        assert_eq!(value["imagen"], "img/taza.jpg");
        assert_eq!(value["precio"].as_f64(), Some(1500.0));
    }
}
