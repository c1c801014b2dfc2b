//! User-visible notices delivered through the `HX-Trigger` header.
//!
//! The page script listens for the `notice` event and shows a toast or
//! dialog; `cart-updated` tells the cart badge and panel to refresh.

use serde::Serialize;
use serde_json::json;

use vitrina_core::Product;

/// Visual style of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeIcon {
    Success,
    Error,
    Warning,
    Info,
}

/// A message shown to the shopper after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub text: String,
    pub icon: NoticeIcon,
    /// Short toasts dismiss themselves; dialogs wait for the shopper.
    pub toast: bool,
}

impl Notice {
    /// A product was added to the cart.
    #[must_use]
    pub fn product_added(product: &Product) -> Self {
        Self {
            title: "Producto agregado".to_string(),
            text: format!("{} fue añadido al carrito", product.name),
            icon: NoticeIcon::Success,
            toast: true,
        }
    }

    /// The cart was emptied.
    #[must_use]
    pub fn cart_cleared() -> Self {
        Self {
            title: "Carrito vacío".to_string(),
            text: "Todos los productos fueron eliminados".to_string(),
            icon: NoticeIcon::Success,
            toast: false,
        }
    }

    /// Checkout was attempted with nothing in the cart.
    #[must_use]
    pub fn empty_cart_checkout() -> Self {
        Self {
            title: "Carrito vacío".to_string(),
            text: "Debes agregar al menos un producto al carrito antes de finalizar la compra."
                .to_string(),
            icon: NoticeIcon::Error,
            toast: false,
        }
    }

    /// The purchase was confirmed.
    #[must_use]
    pub fn purchase_confirmed() -> Self {
        Self {
            title: "¡Gracias por tu compra!".to_string(),
            text: "Tu pedido será procesado.".to_string(),
            icon: NoticeIcon::Success,
            toast: false,
        }
    }

    /// `HX-Trigger` value carrying only this notice.
    #[must_use]
    pub fn trigger_header(&self) -> String {
        ascii_json(&json!({ "notice": self }))
    }

    /// `HX-Trigger` value carrying `cart-updated` and this notice.
    #[must_use]
    pub fn cart_updated_header(&self) -> String {
        ascii_json(&json!({ "cart-updated": {}, "notice": self }))
    }
}

/// `HX-Trigger` value for a cart change with no notice.
pub const CART_UPDATED: &str = "cart-updated";

/// Serialize to JSON with every non-ASCII character escaped, so the result
/// is a valid header value.
fn ascii_json(value: &serde_json::Value) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    out
}
