//! Cart commands.
//!
//! Each command mutates the restored [`CartStore`] (which persists on every
//! change) and returns the text to print.

use std::fmt::Write;

use vitrina_core::{Cart, ProductId, format_amount};
use vitrina_storefront::catalog::Catalog;
use vitrina_storefront::services::CartStore;

use super::CommandError;

/// Render cart lines followed by the totals.
pub fn render(cart: &Cart) -> String {
    if cart.is_empty() {
        return "The cart is empty.".to_string();
    }

    let mut out = String::new();
    for line in cart.lines() {
        let _ = writeln!(
            out,
            "{:>4}  {:<24} {:>3} x {:>10} = {:>10}",
            line.product.id,
            line.product.name,
            line.quantity,
            line.product.price.to_string(),
            format_amount(line.line_total())
        );
    }
    let totals = cart.totals();
    let _ = write!(
        out,
        "Items: {}  Total: {}",
        totals.count,
        format_amount(totals.total)
    );
    out
}

pub fn show(store: &CartStore) -> String {
    render(store.cart())
}

/// Add one unit of a catalog product.
///
/// # Errors
///
/// Returns [`CommandError::UnknownProduct`] if `id` is not in the catalog,
/// or a storage error if the cart cannot be saved.
pub fn add(store: &mut CartStore, catalog: &Catalog, id: ProductId) -> Result<String, CommandError> {
    let product = catalog.get(id).ok_or(CommandError::UnknownProduct(id))?;
    store.add(product)?;
    Ok(format!("{} fue añadido al carrito\n{}", product.name, show(store)))
}

/// Remove one unit of a product. Unknown ids are a no-op.
///
/// # Errors
///
/// Returns a storage error if the cart cannot be saved.
pub fn remove(store: &mut CartStore, id: ProductId) -> Result<String, CommandError> {
    store.remove(id)?;
    Ok(show(store))
}

/// Empty the cart.
///
/// # Errors
///
/// Returns a storage error if the cart cannot be saved.
pub fn clear(store: &mut CartStore) -> Result<String, CommandError> {
    store.clear()?;
    Ok("Todos los productos fueron eliminados".to_string())
}

/// Print the purchase summary, and confirm it when `confirm` is set.
///
/// # Errors
///
/// Returns [`CommandError::EmptyCart`] if there is nothing to buy.
pub fn checkout(store: &mut CartStore, confirm: bool) -> Result<String, CommandError> {
    if !confirm {
        let summary = store.checkout_summary()?;
        return Ok(format!(
            "Resumen de compra\n{}\n\nRun again with --yes to confirm.",
            summary.to_text()
        ));
    }

    let receipt = store.confirm_checkout()?;
    Ok(format!(
        "¡Gracias por tu compra! Tu pedido será procesado.\n{}\nPlaced at {}",
        receipt.summary.to_text(),
        receipt.placed_at.to_rfc3339()
    ))
}
