//! # Bill Calculator
//!
//! Pure computation of the bill summary from cart lines and a fee schedule.
//!
//! ## Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal = Σ unit_price × quantity                                    │
//! │  tax      = round_half_up(subtotal × tax_rate) to a whole unit         │
//! │  total    = subtotal + delivery_fee + other_fee + tax                  │
//! │                                                                         │
//! │  Example: Chai ₹100 × 2, delivery 50, other 0, GST 18%                 │
//! │    subtotal = 200                                                      │
//! │    tax      = round(36.00) = 36                                        │
//! │    total    = 200 + 50 + 0 + 36 = 286                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The summary holds no state of its own; it is recomputed after every cart
//! mutation and is always fully determined by the lines and the schedule.

use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::money::Money;
use crate::types::{FeeSchedule, TaxRate};

/// Derived subtotal, fees and total for a set of cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillSummary {
    /// Sum of line totals.
    pub subtotal: Money,

    /// Delivery fee applied to this bill.
    pub delivery_fee: Money,

    /// Other fee applied to this bill.
    pub other_fee: Money,

    /// Tax on the subtotal, rounded to a whole unit.
    pub tax: Money,

    /// subtotal + delivery_fee + other_fee + tax
    pub total: Money,

    /// Rate the tax was computed with.
    pub tax_rate: TaxRate,

    /// Sum of quantities.
    pub item_count: i64,
}

/// Computes bill summaries against a fixed fee schedule.
#[derive(Debug, Clone, Default)]
pub struct BillCalculator {
    fees: FeeSchedule,
}

impl BillCalculator {
    pub fn new(fees: FeeSchedule) -> Self {
        BillCalculator { fees }
    }

    /// The schedule this calculator applies.
    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.fees
    }

    /// Computes the summary for the given lines. Does not mutate them.
    pub fn compute(&self, lines: &[CartLine]) -> BillSummary {
        compute_bill(lines, &self.fees)
    }
}

/// Computes a bill summary.
///
/// An empty line list yields subtotal 0 and tax 0. Delivery and other fee
/// are still charged unless `charge_delivery_on_empty` is off.
pub fn compute_bill(lines: &[CartLine], fees: &FeeSchedule) -> BillSummary {
    let subtotal: Money = lines.iter().map(CartLine::line_total).sum();
    let item_count: i64 = lines.iter().map(|l| l.quantity).sum();

    let (delivery_fee, other_fee) = if lines.is_empty() && !fees.charge_delivery_on_empty {
        (Money::zero(), Money::zero())
    } else {
        (fees.delivery_fee, fees.other_fee)
    };

    let tax = subtotal.calculate_tax(fees.tax_rate);
    let total = subtotal + delivery_fee + other_fee + tax;

    BillSummary {
        subtotal,
        delivery_fee,
        other_fee,
        tax,
        total,
        tax_rate: fees.tax_rate,
        item_count,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
