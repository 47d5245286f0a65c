//! # Order Ticket
//!
//! The frozen bill handed to the Checkout Submitter.
//!
//! ## Text Format
//! ```text
//! Masala Chai x 2 - 200        ◄── one line per cart line, snapshot order
//! Samosa x 1 - 30
//! Subtotal: 230                ◄── fee lines, fixed order
//! Delivery: 50
//! Other Fee: 0
//! GST (18%): 41
//! TOTAL: 321
//! ```
//!
//! The checkout endpoint parses this text, so the structure must stay
//! byte-for-byte stable: `\n` separators, no leading or trailing whitespace.
//! Amounts use `Money`'s shortest decimal form (`99`, `49.5`, `19.99`).
//! Names cannot break the structure: the cart only freezes names without
//! control characters.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::bill::{compute_bill, BillSummary};
use crate::cart::{CartLine, CartStore};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::FeeSchedule;

/// One item line of the order text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub name: String,
    pub quantity: i64,
    pub line_total: Money,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        OrderLine {
            name: line.name.clone(),
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// Line items and totals frozen at submission time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTicket {
    /// Correlates log events for one submission. Not part of the text.
    pub reference: Uuid,
    pub lines: Vec<OrderLine>,
    pub summary: BillSummary,
    /// e.g. `GST (18%)`
    pub tax_line_label: String,
}

impl OrderTicket {
    /// Freezes the current cart contents and a fresh bill.
    ///
    /// ## Errors
    /// `EmptyCartSubmission` if the cart has no lines.
    pub fn assemble(cart: &CartStore, fees: &FeeSchedule) -> CoreResult<Self> {
        Self::from_lines(&cart.snapshot(), fees)
    }

    /// Builds a ticket from an existing snapshot.
    pub fn from_lines(lines: &[CartLine], fees: &FeeSchedule) -> CoreResult<Self> {
        if lines.is_empty() {
            return Err(CoreError::EmptyCartSubmission);
        }

        Ok(OrderTicket {
            reference: Uuid::new_v4(),
            lines: lines.iter().map(OrderLine::from).collect(),
            summary: compute_bill(lines, fees),
            tax_line_label: fees.tax_line_label(),
        })
    }

    /// Renders the exact text expected by the checkout endpoint.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for OrderTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{} x {} - {}", line.name, line.quantity, line.line_total)?;
        }
        writeln!(f, "Subtotal: {}", self.summary.subtotal)?;
        writeln!(f, "Delivery: {}", self.summary.delivery_fee)?;
        writeln!(f, "Other Fee: {}", self.summary.other_fee)?;
        writeln!(f, "{}: {}", self.tax_line_label, self.summary.tax)?;
        write!(f, "TOTAL: {}", self.summary.total)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::{Product, TaxRate};

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("1", "Masala Chai", Money::from_units(100)),
            Product::new("2", "Samosa", Money::from_units(30)),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_cart_rejected() {
        let cart = CartStore::new();
        let err = OrderTicket::assemble(&cart, &FeeSchedule::default()).unwrap_err();
        assert_eq!(err, CoreError::EmptyCartSubmission);
    }

    #[test]
    fn test_render_exact_text() {
        let catalog = catalog();
        let mut cart = CartStore::new();
        cart.add(&catalog, &"1".into()).unwrap();
        cart.add(&catalog, &"2".into()).unwrap();
        cart.increase(&"1".into()).unwrap();

        let ticket = OrderTicket::assemble(&cart, &FeeSchedule::default()).unwrap();

        assert_eq!(
            ticket.render(),
            "Masala Chai x 2 - 200\n\
             Samosa x 1 - 30\n\
             Subtotal: 230\n\
             Delivery: 50\n\
             Other Fee: 0\n\
             GST (18%): 41\n\
             TOTAL: 321"
        );
    }

    #[test]
    fn test_render_uses_schedule_label() {
        let catalog = catalog();
        let mut cart = CartStore::new();
        cart.add(&catalog, &"2".into()).unwrap();

        let fees = FeeSchedule {
            tax_label: "VAT".to_string(),
            ..FeeSchedule::new(Money::from_units(20), Money::from_units(5), TaxRate::from_bps(825))
        };
        let ticket = OrderTicket::assemble(&cart, &fees).unwrap();

        // 30 × 8.25% = 2.475 → 2
        assert_eq!(
            ticket.render(),
            "Samosa x 1 - 30\nSubtotal: 30\nDelivery: 20\nOther Fee: 5\nVAT (8.25%): 2\nTOTAL: 57"
        );
    }

    #[test]
    fn test_ticket_is_frozen() {
        let catalog = catalog();
        let mut cart = CartStore::new();
        cart.add(&catalog, &"1".into()).unwrap();

        let ticket = OrderTicket::assemble(&cart, &FeeSchedule::default()).unwrap();
        cart.increase(&"1".into()).unwrap();

        assert_eq!(ticket.lines[0].quantity, 1);
        assert_eq!(ticket.summary.total, Money::from_units(100 + 50 + 18));
    }

    #[test]
    fn test_render_fractional_amounts() {
        let mut cart = CartStore::new();
        cart.add_product(&Product::new("V", "Vada Pav", Money::from_minor(4950)))
            .unwrap();
        cart.increase(&"V".into()).unwrap();
        cart.add_product(&Product::new("K", "Kulfi", Money::from_minor(1999)))
            .unwrap();

        let ticket = OrderTicket::assemble(&cart, &FeeSchedule::default()).unwrap();

        // 118.99 × 18% = 21.4182 → 21
        assert_eq!(
            ticket.render(),
            "Vada Pav x 2 - 99\nKulfi x 1 - 19.99\nSubtotal: 118.99\nDelivery: 50\nOther Fee: 0\nGST (18%): 21\nTOTAL: 189.99"
        );
    }
}
