//! # Cart Store
//!
//! Owns the mapping from product identity to cart line.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Operations                                 │
//! │                                                                         │
//! │  User Action              Operation            Line Change              │
//! │  ───────────              ─────────            ───────────              │
//! │                                                                         │
//! │  "Add to Cart" ─────────► add(id) ───────────► new line qty 1          │
//! │                                                 or qty += 1             │
//! │                                                                         │
//! │  "+" ───────────────────► increase(id) ──────► qty += 1                │
//! │                                                                         │
//! │  "-" ───────────────────► decrease(id) ──────► qty -= 1                │
//! │                                                 qty 0 → line deleted    │
//! │                                                                         │
//! │  "X" ───────────────────► remove(id) ────────► line deleted (or no-op) │
//! │                                                                         │
//! │  Badge / panel ─────────► total_item_count()   (read only)             │
//! │                           snapshot()                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product ID
//! - Every stored line has `1 <= quantity <= MAX_LINE_QUANTITY`
//! - A zero-quantity line is deleted, never stored
//! - Every frozen name is one printable line and every unit price is
//!   within `MAX_AMOUNT_UNITS`, so line totals and bills cannot overflow
//! - A failed operation leaves the cart unchanged

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::{validate_cart_size, validate_product_name, validate_unit_price};
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One product's accumulated quantity within the current order.
///
/// ## Price Freezing
/// Name and unit price are captured on first addition. Later catalog
/// reloads do not change a line that is already in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product ID
    pub product_id: ProductId,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Unit price at time of adding (frozen)
    pub unit_price: Money,

    /// Quantity in cart, always >= 1
    pub quantity: i64,

    /// When this line was first added
    pub added_at: DateTime<Utc>,

    /// Insertion sequence, gives the snapshot its stable order.
    #[serde(skip)]
    sequence: u64,
}

impl CartLine {
    fn from_product(product: &Product, sequence: u64) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
            added_at: Utc::now(),
            sequence,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Cart Store
// =============================================================================

/// The shopping cart for one session.
///
/// Created empty at session start, mutated only through the methods below,
/// and cleared after a successful checkout handoff.
#[derive(Debug, Clone)]
pub struct CartStore {
    lines: HashMap<ProductId, CartLine>,
    next_sequence: u64,
}

impl CartStore {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        CartStore {
            lines: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Adds one unit of a catalog product.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1
    /// - Product not in cart: new line with quantity 1, name/price snapshotted
    ///
    /// ## Errors
    /// - `ProductNotFound` if the ID is unknown or the product is unavailable
    /// - `QuantityTooLarge` / `CartTooLarge` if a bound would be exceeded
    pub fn add(&mut self, catalog: &Catalog, product_id: &ProductId) -> CoreResult<()> {
        let product = catalog.resolve_available(product_id)?;
        self.add_product(product)
    }

    /// Adds one unit of an already resolved product.
    ///
    /// Name and price are validated before they are frozen into a new
    /// line, since products built in code never passed the catalog
    /// boundary.
    ///
    /// ## Errors
    /// - `ProductNotFound` if the product is unavailable
    /// - `CartTooLarge` / `QuantityTooLarge` if a bound would be exceeded
    /// - `Validation` if the name has control characters or the price is
    ///   outside `0..=MAX_AMOUNT_UNITS`
    pub fn add_product(&mut self, product: &Product) -> CoreResult<()> {
        if !product.is_available() {
            return Err(CoreError::ProductNotFound(product.id.to_string()));
        }

        if self.lines.contains_key(&product.id) {
            return self.increase(&product.id);
        }

        validate_cart_size(self.lines.len())
            .map_err(|_| CoreError::CartTooLarge { max: MAX_CART_LINES })?;
        validate_product_name(&product.name)?;
        validate_unit_price(product.price)?;

        let line = CartLine::from_product(product, self.next_sequence);
        self.next_sequence += 1;
        self.lines.insert(product.id.clone(), line);

        debug!(product_id = %product.id, quantity = 1, "Cart line added");
        Ok(())
    }

    /// Increments an existing line by one.
    ///
    /// ## Errors
    /// - `LineNotFound` if the product has no line
    /// - `QuantityTooLarge` if the line is already at the maximum
    pub fn increase(&mut self, product_id: &ProductId) -> CoreResult<()> {
        let line = self
            .lines
            .get_mut(product_id)
            .ok_or_else(|| CoreError::LineNotFound(product_id.to_string()))?;

        let requested = line.quantity + 1;
        if requested > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested,
                max: MAX_LINE_QUANTITY,
            });
        }
        line.quantity = requested;

        debug!(product_id = %product_id, quantity = requested, "Cart line increased");
        Ok(())
    }

    /// Decrements an existing line by one, deleting it when it reaches zero.
    ///
    /// Going past zero is defined behavior, not an error.
    ///
    /// ## Errors
    /// - `LineNotFound` if the product has no line
    pub fn decrease(&mut self, product_id: &ProductId) -> CoreResult<()> {
        let line = self
            .lines
            .get_mut(product_id)
            .ok_or_else(|| CoreError::LineNotFound(product_id.to_string()))?;

        line.quantity -= 1;
        let remaining = line.quantity;

        if remaining <= 0 {
            self.lines.remove(product_id);
            debug!(product_id = %product_id, "Cart line removed at zero quantity");
        } else {
            debug!(product_id = %product_id, quantity = remaining, "Cart line decreased");
        }
        Ok(())
    }

    /// Deletes a line unconditionally.
    ///
    /// Returns the removed line, or `None` if there was nothing to remove.
    /// Removing an absent product is a no-op.
    pub fn remove(&mut self, product_id: &ProductId) -> Option<CartLine> {
        let removed = self.lines.remove(product_id);
        if removed.is_some() {
            debug!(product_id = %product_id, "Cart line removed");
        }
        removed
    }

    /// Empties the cart (new session / after checkout).
    pub fn clear(&mut self) {
        self.lines.clear();
        debug!("Cart cleared");
    }

    /// Sum of quantities across all lines (the cart badge).
    pub fn total_item_count(&self) -> i64 {
        self.lines.values().map(|l| l.quantity).sum()
    }

    /// Copies of all lines in first-added order.
    ///
    /// Callers own the returned data; mutating it does not touch the cart.
    pub fn snapshot(&self) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = self.lines.values().cloned().collect();
        lines.sort_by_key(|l| l.sequence);
        lines
    }

    /// Returns the line for a product, if any.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.get(product_id)
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::MAX_AMOUNT_UNITS;

    fn test_catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("A", "Masala Chai", Money::from_units(100)),
            Product::new("B", "Samosa", Money::from_units(30)),
            Product::new("C", "Filter Coffee", Money::from_units(60)),
            Product::new("X", "Thali", Money::from_units(250)).with_available(false),
        ])
        .unwrap()
    }

    fn id(s: &str) -> ProductId {
        ProductId::from(s)
    }

    fn assert_invariants(cart: &CartStore) {
        let snapshot = cart.snapshot();
        assert!(snapshot.iter().all(|l| l.quantity >= 1));
        assert_eq!(
            cart.total_item_count(),
            snapshot.iter().map(|l| l.quantity).sum::<i64>()
        );
        assert_eq!(cart.is_empty(), snapshot.is_empty());
    }

    #[test]
    fn test_add_creates_line_with_snapshot() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();

        cart.add(&catalog, &id("A")).unwrap();

        let line = cart.line(&id("A")).unwrap();
        assert_eq!(line.name, "Masala Chai");
        assert_eq!(line.unit_price, Money::from_units(100));
        assert_eq!(line.quantity, 1);
        assert_eq!(cart.total_item_count(), 1);
    }

    #[test]
    fn test_add_same_product_increments() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();

        cart.add(&catalog, &id("A")).unwrap();
        cart.add(&catalog, &id("A")).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line(&id("A")).unwrap().quantity, 2);
    }

    #[test]
    fn test_add_unknown_product_leaves_cart_unchanged() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();
        cart.add(&catalog, &id("B")).unwrap();
        let before = cart.snapshot();

        let err = cart.add(&catalog, &id("nope")).unwrap_err();

        assert_eq!(err, CoreError::ProductNotFound("nope".to_string()));
        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_add_unavailable_product_rejected() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();

        let err = cart.add(&catalog, &id("X")).unwrap_err();

        assert!(matches!(err, CoreError::ProductNotFound(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increase_and_subtotal() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();

        cart.add(&catalog, &id("A")).unwrap();
        cart.increase(&id("A")).unwrap();

        let line = cart.line(&id("A")).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total(), Money::from_units(200));
    }

    #[test]
    fn test_increase_missing_line() {
        let mut cart = CartStore::new();
        assert_eq!(
            cart.increase(&id("A")),
            Err(CoreError::LineNotFound("A".to_string()))
        );
    }

    #[test]
    fn test_decrease_to_zero_removes_line() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();

        cart.add(&catalog, &id("A")).unwrap();
        cart.decrease(&id("A")).unwrap();

        assert!(cart.line(&id("A")).is_none());
        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_decrease_keeps_positive_line() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();

        cart.add(&catalog, &id("A")).unwrap();
        cart.add(&catalog, &id("A")).unwrap();
        cart.decrease(&id("A")).unwrap();

        assert_eq!(cart.line(&id("A")).unwrap().quantity, 1);
    }

    #[test]
    fn test_decrease_missing_line() {
        let mut cart = CartStore::new();
        assert!(matches!(
            cart.decrease(&id("A")),
            Err(CoreError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();
        cart.add(&catalog, &id("A")).unwrap();
        cart.add(&catalog, &id("B")).unwrap();

        assert!(cart.remove(&id("A")).is_some());
        let after_first = cart.snapshot();

        assert!(cart.remove(&id("A")).is_none());
        assert_eq!(cart.snapshot(), after_first);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();
        cart.add(&catalog, &id("A")).unwrap();

        let mut snapshot = cart.snapshot();
        snapshot[0].quantity = 50;
        snapshot.clear();

        assert_eq!(cart.line(&id("A")).unwrap().quantity, 1);
    }

    #[test]
    fn test_snapshot_insertion_order() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();
        cart.add(&catalog, &id("C")).unwrap();
        cart.add(&catalog, &id("A")).unwrap();
        cart.add(&catalog, &id("B")).unwrap();
        cart.add(&catalog, &id("C")).unwrap();

        let order: Vec<_> = cart.snapshot().into_iter().map(|l| l.product_id).collect();
        assert_eq!(order, vec![id("C"), id("A"), id("B")]);
    }

    #[test]
    fn test_price_frozen_on_first_add() {
        let mut cart = CartStore::new();
        cart.add_product(&Product::new("A", "Chai", Money::from_units(100)))
            .unwrap();
        cart.add_product(&Product::new("A", "Chai (new)", Money::from_units(150)))
            .unwrap();

        let line = cart.line(&id("A")).unwrap();
        assert_eq!(line.unit_price, Money::from_units(100));
        assert_eq!(line.name, "Chai");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_quantity_bound() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();
        cart.add(&catalog, &id("A")).unwrap();
        for _ in 1..MAX_LINE_QUANTITY {
            cart.increase(&id("A")).unwrap();
        }
        assert_eq!(cart.line(&id("A")).unwrap().quantity, MAX_LINE_QUANTITY);

        let err = cart.add(&catalog, &id("A")).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        assert_eq!(cart.line(&id("A")).unwrap().quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn test_add_product_rejects_price_above_cap() {
        let mut cart = CartStore::new();
        let pricey = Product::new("P", "Gold Tea", Money::from_units(MAX_AMOUNT_UNITS + 1));

        let err = cart.add_product(&pricey).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::OutOfRange { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_product_rejects_control_characters_in_name() {
        let mut cart = CartStore::new();
        let forged = Product::new("P", "Chai x 1 - 0\nTOTAL: 0", Money::from_units(100));

        let err = cart.add_product(&forged).unwrap_err();

        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_fractional_line_total_is_exact() {
        let mut cart = CartStore::new();
        cart.add_product(&Product::new("V", "Vada Pav", Money::from_minor(4950)))
            .unwrap();
        cart.increase(&id("V")).unwrap();

        assert_eq!(cart.line(&id("V")).unwrap().line_total(), Money::from_units(99));
    }

    #[test]
    fn test_cart_size_bound() {
        let mut cart = CartStore::new();
        for i in 0..MAX_CART_LINES {
            cart.add_product(&Product::new(i.to_string(), "Item", Money::from_units(1)))
                .unwrap();
        }

        let err = cart
            .add_product(&Product::new("overflow", "Item", Money::from_units(1)))
            .unwrap_err();
        assert_eq!(err, CoreError::CartTooLarge { max: MAX_CART_LINES });
        assert_eq!(cart.line_count(), MAX_CART_LINES);
    }

    #[test]
    fn test_clear() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();
        cart.add(&catalog, &id("A")).unwrap();

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
    }

    #[test]
    fn test_invariants_hold_over_operation_sequence() {
        let catalog = test_catalog();
        let mut cart = CartStore::new();
        let ids = ["A", "B", "C", "X", "missing"];

        // Deterministic pseudo-random walk over all operations.
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        for _ in 0..2_000 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let target = id(ids[(seed % ids.len() as u64) as usize]);

            match (seed >> 8) % 4 {
                0 => {
                    let _ = cart.add(&catalog, &target);
                }
                1 => {
                    let _ = cart.increase(&target);
                }
                2 => {
                    let _ = cart.decrease(&target);
                }
                _ => {
                    cart.remove(&target);
                }
            }

            assert_invariants(&cart);
            assert!(cart.line(&id("X")).is_none());
            assert!(cart.line(&id("missing")).is_none());
        }
    }
}
