//! Checkout route handlers.
//!
//! Checkout is two steps: `GET /checkout` shows the itemized summary and
//! `POST /checkout` confirms it. No payment is taken; confirming simply
//! empties the cart and its stored slot.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use tracing::instrument;

use vitrina_core::{CheckoutSummary, format_amount};

use crate::error::Result;
use crate::routes::notice::Notice;
use crate::state::AppState;

/// Checkout line display data for templates.
#[derive(Clone)]
pub struct SummaryLineView {
    pub name: String,
    pub quantity: u32,
    pub line_total: String,
}

/// Checkout summary display data for templates.
#[derive(Clone)]
pub struct SummaryView {
    pub lines: Vec<SummaryLineView>,
    pub total: String,
    pub count: u32,
}

impl From<&CheckoutSummary> for SummaryView {
    fn from(summary: &CheckoutSummary) -> Self {
        Self {
            lines: summary
                .lines
                .iter()
                .map(|line| SummaryLineView {
                    name: line.name.clone(),
                    quantity: line.quantity,
                    line_total: format_amount(line.line_total),
                })
                .collect(),
            total: format_amount(summary.total),
            count: summary.count,
        }
    }
}

/// Summary fragment shown before confirming.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/summary.html")]
pub struct CheckoutSummaryTemplate {
    pub summary: SummaryView,
}

/// Fragment shown once the purchase is confirmed.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/complete.html")]
pub struct CheckoutCompleteTemplate {
    pub summary: SummaryView,
    pub placed_at: String,
}

/// Show the checkout summary. An empty cart is rejected with a notice.
#[instrument(skip(state))]
pub async fn summary(State(state): State<AppState>) -> Result<Response> {
    let summary = state.cart().lock().await.checkout_summary()?;
    Ok(CheckoutSummaryTemplate {
        summary: SummaryView::from(&summary),
    }
    .into_response())
}

/// Confirm the purchase and empty the cart.
#[instrument(skip(state))]
pub async fn confirm(State(state): State<AppState>) -> Result<Response> {
    let receipt = state.cart().lock().await.confirm_checkout()?;

    Ok((
        AppendHeaders([(
            "HX-Trigger",
            Notice::purchase_confirmed().cart_updated_header(),
        )]),
        CheckoutCompleteTemplate {
            summary: SummaryView::from(&receipt.summary),
            placed_at: receipt.placed_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        },
    )
        .into_response())
}
