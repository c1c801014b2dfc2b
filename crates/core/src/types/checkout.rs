//! Checkout summary shown to the shopper before confirming a purchase.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::format_amount;
use super::{Price, ProductId};

/// One itemized line of a [`CheckoutSummary`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Decimal,
}

/// Itemized view of a cart at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub lines: Vec<SummaryLine>,
    pub total: Decimal,
    pub count: u32,
}

impl CheckoutSummary {
    /// Render the summary as plain text, one line per product followed by
    /// the amount to pay.
    ///
    /// ```text
    /// Taza (Cantidad: 2) - Total: $3000
    /// Total a pagar: $3000
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(&format!(
                "{} (Cantidad: {}) - Total: {}\n",
                line.name,
                line.quantity,
                format_amount(line.line_total)
            ));
        }
        out.push_str(&format!("Total a pagar: {}", format_amount(self.total)));
        out
    }
}
