//! # Cart State
//!
//! Owns the one cart of the session and the calculator that prices it.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` so every mutation runs to
//! completion before the next one starts, whichever input source issued it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Shell Input              Command                 Cart State Change     │
//! │  ───────────              ───────                 ─────────────────     │
//! │                                                                         │
//! │  add 42 ─────────────────► add_to_cart() ───────► line qty = 1 / +1    │
//! │                                                                         │
//! │  inc 42 / dec 42 ────────► increase/decrease ───► qty ± 1 (0 removes)  │
//! │                                                                         │
//! │  rm 42 ──────────────────► remove_from_cart() ──► line deleted         │
//! │                                                                         │
//! │  buy ────────────────────► buy_now() ───────────► cleared on handoff   │
//! │                                                                         │
//! │  cart ───────────────────► get_cart() ──────────► (read only)          │
//! │                                                                         │
//! │  Every command answers with a freshly computed bill.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use storefront_core::{BillCalculator, BillSummary, CartLine, CartStore};

/// Cart contents plus the bill derived from them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    /// Lines in first-added order
    pub lines: Vec<CartLine>,

    /// Badge count (sum of quantities)
    pub item_count: i64,

    pub bill: BillSummary,

    /// e.g. `GST (18%)`
    pub tax_line_label: String,
}

/// Managed cart state.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<CartStore>>,
    calculator: BillCalculator,
}

impl CartState {
    /// Creates an empty cart priced by `calculator`.
    pub fn new(calculator: BillCalculator) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(CartStore::new())),
            calculator,
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// A panic inside an earlier closure leaves the store itself consistent
    /// (every `CartStore` method validates before mutating), so a poisoned
    /// lock is recovered rather than propagated.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    pub fn calculator(&self) -> &BillCalculator {
        &self.calculator
    }

    /// Snapshot of the cart with a recomputed bill.
    pub fn response(&self) -> CartResponse {
        self.with_cart(|cart| self.response_for(cart))
    }

    /// Builds the response while the caller already holds the lock.
    pub fn response_for(&self, cart: &CartStore) -> CartResponse {
        let lines = cart.snapshot();
        let bill = self.calculator.compute(&lines);

        CartResponse {
            item_count: bill.item_count,
            lines,
            bill,
            tax_line_label: self.calculator.fee_schedule().tax_line_label(),
        }
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(BillCalculator::default())
    }
}
