//! # Checkout Handoff
//!
//! Hands the rendered order text to the checkout page:
//!
//! ```text
//! OrderTicket::render()
//!        │
//!        ▼
//! {checkout_base}/checkout?cart=<url-encoded order text>
//!        │
//!        ▼
//! CheckoutSubmitter::submit()   (fire-and-forget, no response awaited)
//! ```

use serde::Serialize;
use storefront_core::OrderTicket;
use tracing::info;
use url::Url;
use uuid::Uuid;

use crate::error::{ApiError, ErrorCode};

/// One checkout handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub reference: Uuid,

    /// Exact order text, before encoding
    pub order_text: String,

    /// Full checkout URL carrying the encoded text
    pub url: String,
}

impl CheckoutRequest {
    /// Renders the ticket and builds its checkout URL.
    pub fn new(ticket: &OrderTicket, checkout_base: &str) -> Result<Self, ApiError> {
        let order_text = ticket.render();
        let url = checkout_url(checkout_base, &order_text)?;

        Ok(CheckoutRequest {
            reference: ticket.reference,
            order_text,
            url: url.to_string(),
        })
    }
}

/// Builds `{base}/checkout?cart=<order text>`.
///
/// Any path on the base (e.g. `/exec`) is kept. The text is encoded as a
/// form query value, so it decodes back to the exact order text.
pub fn checkout_url(base: &str, order_text: &str) -> Result<Url, ApiError> {
    let base = base.trim().trim_end_matches('/');
    let mut url = Url::parse(&format!("{}/checkout", base)).map_err(|e| {
        ApiError::new(
            ErrorCode::ValidationError,
            format!("Invalid checkout URL '{}': {}", base, e),
        )
    })?;

    url.query_pairs_mut().clear().append_pair("cart", order_text);
    Ok(url)
}

/// Destination for checkout handoffs.
pub trait CheckoutSubmitter: Send + Sync {
    /// Starts the checkout. Does not wait for the order to be confirmed.
    fn submit(&self, request: &CheckoutRequest) -> Result<(), ApiError>;
}

/// Records the handoff in the log; the shell prints the URL for the user
/// to open.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSubmitter;

impl CheckoutSubmitter for LogSubmitter {
    fn submit(&self, request: &CheckoutRequest) -> Result<(), ApiError> {
        info!(
            reference = %request.reference,
            url = %request.url,
            "Checkout handed off"
        );
        Ok(())
    }
}
