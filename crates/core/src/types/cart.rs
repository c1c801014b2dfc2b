//! Shopping cart model.
//!
//! A [`Cart`] is an ordered sequence of [`LineItem`]s, one per product.
//! Every line has a quantity of at least one; a line whose quantity would
//! drop to zero is removed instead.
//!
//! ```text
//! absent ──add──▶ present(1) ──add──▶ present(n+1)
//!    ▲                │                    │
//!    └────remove──────┘   present(n-1) ◀──remove (n > 1)
//! ```

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};

use super::{CheckoutSummary, Product, ProductId, SummaryLine};

/// Errors raised when a sequence of lines does not form a valid cart.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Two lines reference the same product.
    #[error("product {0} appears in more than one cart line")]
    DuplicateProduct(ProductId),
    /// A line has a quantity of zero.
    #[error("cart line for product {0} has zero quantity")]
    ZeroQuantity(ProductId),
}

/// A product together with the quantity requested.
///
/// Serialized as the product's catalog fields plus `cantidad`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

impl LineItem {
    /// Returns `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

/// Aggregate figures for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of `price × quantity` over all lines.
    pub total: Decimal,
    /// Sum of quantities over all lines.
    pub count: u32,
}

impl CartTotals {
    /// Totals of an empty cart.
    pub const ZERO: Self = Self {
        total: Decimal::ZERO,
        count: 0,
    };
}

impl Default for CartTotals {
    fn default() -> Self {
        Self::ZERO
    }
}

/// An ordered set of line items keyed by product id.
///
/// ## Invariants
///
/// - No two lines share a product id
/// - Every line has `quantity >= 1`
///
/// Deserialization enforces both, so a stored cart that violates them is
/// rejected as malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from existing lines, checking the invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::DuplicateProduct`] if a product id repeats and
    /// [`CartError::ZeroQuantity`] if any line has quantity zero.
    pub fn from_lines(items: Vec<LineItem>) -> Result<Self, CartError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.quantity == 0 {
                return Err(CartError::ZeroQuantity(item.product.id));
            }
            if !seen.insert(item.product.id) {
                return Err(CartError::DuplicateProduct(item.product.id));
            }
        }
        Ok(Self { items })
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line, or appends a new line with quantity 1.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.items.push(LineItem {
                product: product.clone(),
                quantity: 1,
            });
        }
    }

    /// Remove one unit of the product with `id`.
    ///
    /// A line at quantity 1 is dropped entirely. Returns `false` (and does
    /// nothing) if the product is not in the cart.
    pub fn remove_item(&mut self, id: ProductId) -> bool {
        let Some(index) = self.items.iter().position(|l| l.product.id == id) else {
            return false;
        };

        match self.items.get_mut(index) {
            Some(line) if line.quantity > 1 => line.quantity -= 1,
            _ => {
                self.items.remove(index);
            }
        }
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Compute the cart total and item count.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        self.items
            .iter()
            .fold(CartTotals::ZERO, |acc, line| CartTotals {
                total: acc.total.saturating_add(line.line_total()),
                count: acc.count.saturating_add(line.quantity),
            })
    }

    /// Build the itemized summary shown before checkout.
    #[must_use]
    pub fn summary(&self) -> CheckoutSummary {
        let totals = self.totals();
        CheckoutSummary {
            lines: self
                .items
                .iter()
                .map(|line| SummaryLine {
                    product_id: line.product.id,
                    name: line.product.name.clone(),
                    quantity: line.quantity,
                    unit_price: line.product.price,
                    line_total: line.line_total(),
                })
                .collect(),
            total: totals.total,
            count: totals.count,
        }
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|l| l.product.id == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|l| l.product.id == id)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_lines(items)
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Price;

    fn product(id: i64, units: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Producto {id}"),
            price: Price::from_units(units),
            description: String::new(),
            image: format!("img/{id}.jpg"),
        }
    }

    #[test]
    fn test_empty_totals_are_zero() {
        assert_eq!(Cart::new().totals(), CartTotals::ZERO);
    }

    #[test]
    fn test_add_twice_increments_single_line() {
        let mut cart = Cart::new();
        let taza = product(1, 100);
        cart.add_item(&taza);
        cart.add_item(&taza);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(taza.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_appends_in_order() {
        let mut cart = Cart::new();
        cart.add_item(&product(2, 10));
        cart.add_item(&product(1, 10));
        cart.add_item(&product(2, 10));

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_remove_decrements() {
        let mut cart = Cart::new();
        let taza = product(1, 100);
        cart.add_item(&taza);
        cart.add_item(&taza);

        assert!(cart.remove_item(taza.id));
        assert_eq!(cart.line(taza.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_last_unit_drops_line() {
        let mut cart = Cart::new();
        let taza = product(1, 100);
        cart.add_item(&taza);

        assert!(cart.remove_item(taza.id));
        assert!(cart.line(taza.id).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        let before = cart.clone();

        assert!(!cart.remove_item(ProductId::new(99)));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        cart.add_item(&product(2, 50));
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.totals(), CartTotals::ZERO);
    }

    #[test]
    fn test_totals_match_lines_after_mixed_operations() {
        let a = product(1, 1500);
        let b = Product {
            price: Price::new(Decimal::new(1999, 2)).unwrap(),
            ..product(2, 0)
        };
        let c = product(3, 0);

        let mut cart = Cart::new();
        let ops: [(bool, &Product); 9] = [
            (true, &a),
            (true, &b),
            (true, &b),
            (false, &a),
            (true, &c),
            (false, &c),
            (false, &c),
            (true, &a),
            (true, &b),
        ];
        for (add, p) in ops {
            if add {
                cart.add_item(p);
            } else {
                cart.remove_item(p.id);
            }

            let expected_total: Decimal = cart.lines().iter().map(LineItem::line_total).sum();
            let expected_count: u32 = cart.lines().iter().map(|l| l.quantity).sum();
            assert_eq!(cart.totals().total, expected_total);
            assert_eq!(cart.totals().count, expected_count);
            assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        }

        // a×1 + b×3
        assert_eq!(cart.totals().total, Decimal::new(1500_00 + 3 * 1999, 2));
        assert_eq!(cart.totals().count, 4);
    }

    #[test]
    fn test_totals_with_max_price_do_not_overflow() {
        let dear = Product {
            price: Price::MAX,
            ..product(7, 0)
        };
        let mut cart = Cart::new();
        cart.add_item(&dear);
        cart.add_item(&dear);
        cart.add_item(&product(8, 1));

        let totals = cart.totals();
        assert_eq!(totals.count, 3);
        assert_eq!(totals.total, Decimal::from(2_000_000_000_001_u64));
    }

    #[test]
    fn test_deserialize_rejects_price_above_max() {
        let json = r#"[{"id": 1, "nombre": "a", "precio": 50000000000000000000000000000, "desc": "", "imagen": "", "cantidad": 2}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 100));
        cart.add_item(&product(1, 100));
        cart.add_item(&Product {
            price: Price::new(Decimal::new(1999, 2)).unwrap(),
            ..product(2, 0)
        });

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = Cart::new();
        cart.add_item(&product(5, 30));
        let value = serde_json::to_value(&cart).unwrap();

        let line = &value[0];
        assert_eq!(line["id"], 5);
        assert_eq!(line["nombre"], "Producto 5");
        assert_eq!(line["cantidad"], 1);
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[
            {"id": 1, "nombre": "a", "precio": 1, "desc": "", "imagen": "", "cantidad": 1},
            {"id": 1, "nombre": "a", "precio": 1, "desc": "", "imagen": "", "cantidad": 2}
        ]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let json = r#"[{"id": 1, "nombre": "a", "precio": 1, "desc": "", "imagen": "", "cantidad": 0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_from_lines_errors() {
        let line = LineItem {
            product: product(4, 1),
            quantity: 0,
        };
        assert_eq!(
            Cart::from_lines(vec![line]),
            Err(CartError::ZeroQuantity(ProductId::new(4)))
        );
    }

    #[test]
    fn test_summary_lists_line_totals() {
        let mut cart = Cart::new();
        let a = product(1, 200);
        cart.add_item(&a);
        cart.add_item(&a);
        cart.add_item(&product(2, 50));

        let summary = cart.summary();
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].line_total, Decimal::from(400));
        assert_eq!(summary.total, Decimal::from(450));
        assert_eq!(summary.count, 3);
    }
}
