//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It owns the cart state
//! machine and the bill computation engine as pure code with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Terminal UI (apps/terminal)                  │   │
//! │  │    Product list ──► Cart panel ──► Bill summary ──► Buy now    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   cart    │  │   bill    │  │   order   │  │   │
//! │  │   │  Product  │  │ CartStore │  │ BillCalc  │  │OrderTicket│  │   │
//! │  │   │  Catalog  │  │ CartLine  │  │BillSummary│  │   text    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO RENDERING                           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              storefront-catalog (Catalog Provider)              │   │
//! │  │           HTTP fetch, record validation → Catalog               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ProductId, Product, TaxRate, FeeSchedule)
//! - [`money`] - Money type in minor units
//! - [`catalog`] - Immutable product lookup
//! - [`cart`] - CartStore and CartLine
//! - [`bill`] - BillCalculator and BillSummary
//! - [`order`] - OrderTicket (the text handed to checkout)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{BillCalculator, CartStore, Catalog, FeeSchedule, Money, Product};
//!
//! let catalog = Catalog::new(vec![Product::new("1", "Masala Chai", Money::from_units(100))])
//!     .unwrap();
//!
//! let mut cart = CartStore::new();
//! cart.add(&catalog, &"1".into()).unwrap();
//! cart.increase(&"1".into()).unwrap();
//!
//! let bill = BillCalculator::new(FeeSchedule::default()).compute(&cart.snapshot());
//! assert_eq!(bill.subtotal, Money::from_units(200));
//! assert_eq!(bill.tax, Money::from_units(36));
//! assert_eq!(bill.total, Money::from_units(286));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use bill::{compute_bill, BillCalculator, BillSummary};
pub use cart::{CartLine, CartStore};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{OrderLine, OrderTicket};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// Guards against runaway "+" clicks; the badge and bill stay meaningful.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum unit price or flat fee, in whole units.
///
/// Prices are checked against it at the catalog boundary and again when a
/// product enters the cart; fees are checked at config time. With line
/// quantities and line counts also bounded, every bill sum fits in `i64`.
pub const MAX_AMOUNT_UNITS: i64 = 10_000_000;
