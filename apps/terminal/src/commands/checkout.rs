//! # Checkout Command
//!
//! ```text
//! buy_now
//!   │
//!   ├── cart empty? ──► EMPTY_CART "Your cart is empty!"   (nothing sent)
//!   │
//!   ├── OrderTicket::assemble (lines + fresh bill, frozen)
//!   ├── CheckoutRequest::new  ({base}/checkout?cart=...)
//!   ├── submitter.submit      (fire-and-forget)
//!   └── cart cleared
//! ```

use storefront_core::OrderTicket;
use tracing::{debug, info};

use crate::checkout::{CheckoutRequest, CheckoutSubmitter};
use crate::error::{ApiError, ErrorCode};
use crate::state::{CartState, ConfigState};

/// Submits the current cart for checkout.
///
/// The cart lock is held from assembly to clearing, so nothing added in
/// between can be lost.
pub fn buy_now(
    config: &ConfigState,
    cart: &CartState,
    submitter: &dyn CheckoutSubmitter,
) -> Result<CheckoutRequest, ApiError> {
    debug!("buy_now command");

    cart.with_cart_mut(|c| -> Result<CheckoutRequest, ApiError> {
        let ticket = OrderTicket::assemble(c, cart.calculator().fee_schedule())?;

        let base = config.checkout_base().ok_or_else(|| {
            ApiError::new(
                ErrorCode::ValidationError,
                "No checkout URL configured",
            )
        })?;
        let request = CheckoutRequest::new(&ticket, base)?;

        submitter.submit(&request)?;
        c.clear();

        info!(
            reference = %ticket.reference,
            total = %ticket.summary.total,
            items = ticket.summary.item_count,
            "Order submitted"
        );
        Ok(request)
    })
}
