//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  FeeSchedule    │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  delivery_fee   │   │  bps (u32)      │       │
//! │  │  name           │   │  other_fee      │   │  1800 = 18%     │       │
//! │  │  price          │   │  tax_rate       │   └─────────────────┘       │
//! │  │  available      │   │  tax_label      │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are owned by the Catalog Provider and are immutable once
//! fetched. The cart snapshots what it needs (see [`crate::cart::CartLine`]).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::validate_tax_fraction;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01% = 1/10000, so the reference GST of 0.18 is 1800.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a fraction (`0.18` = 18%).
    ///
    /// The fraction must be a whole number of basis points; anything finer
    /// is rejected rather than quantized.
    ///
    /// ```rust
    /// use storefront_core::types::TaxRate;
    ///
    /// assert_eq!(TaxRate::from_fraction(0.18).unwrap().bps(), 1800);
    /// assert!(TaxRate::from_fraction(0.18125).is_err());
    /// assert!(TaxRate::from_fraction(-0.1).is_err());
    /// ```
    pub fn from_fraction(fraction: f64) -> Result<Self, ValidationError> {
        validate_tax_fraction(fraction)?;
        Ok(TaxRate((fraction * 10_000.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Percentage without trailing zeros: `18%`, `18.5%`, `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}%", whole)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}%", whole, frac / 10)
        } else {
            write!(f, "{}.{:02}%", whole, frac)
        }
    }
}

// =============================================================================
// Product ID
// =============================================================================

/// Opaque product identity as issued by the Catalog Provider.
///
/// Numeric IDs from the product service are normalised to decimal text at
/// the catalog boundary, so `7` and `"7"` name the same product.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product ID, trimming surrounding whitespace.
    pub fn new(id: impl AsRef<str>) -> Self {
        ProductId(id.as_ref().trim().to_string())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::new(id)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId::new(id)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id.to_string())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product offered by the storefront.
///
/// Only `id`, `name`, `price` and `available` matter to the cart and bill.
/// Descriptions and image URL are carried for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,

    /// Display name, also used in the order text.
    pub name: String,

    /// One-line description for the product grid.
    #[serde(default)]
    pub short_description: String,

    /// Full description for the product detail view.
    #[serde(default)]
    pub long_description: String,

    /// Product image.
    #[serde(default)]
    pub image_url: String,

    /// Unit price.
    pub price: Money,

    /// Whether the product can be added to the cart.
    pub available: bool,
}

impl Product {
    /// Creates an available product with empty descriptive fields.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            short_description: String::new(),
            long_description: String::new(),
            image_url: String::new(),
            price,
            available: true,
        }
    }

    /// Sets the availability flag.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Sets the view-only descriptive fields.
    pub fn with_details(
        mut self,
        short_description: impl Into<String>,
        long_description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        self.short_description = short_description.into();
        self.long_description = long_description.into();
        self.image_url = image_url.into();
        self
    }

    /// Checks if the product can be added to a cart.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.available
    }
}

// =============================================================================
// Fee Schedule
// =============================================================================

/// The fixed fees applied to every bill.
///
/// ## Reference Schedule
/// ```text
/// delivery_fee  50     flat, added to every order
/// other_fee      0     flat, reserved
/// tax_rate     18%     applied to the subtotal ("GST")
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeSchedule {
    /// Flat delivery charge.
    pub delivery_fee: Money,

    /// Flat surcharge, currently unused by the reference store.
    pub other_fee: Money,

    /// Tax applied to the subtotal.
    pub tax_rate: TaxRate,

    /// Name printed on the tax line (`GST (18%): 36`).
    pub tax_label: String,

    /// Whether delivery and other fee apply when the cart has no lines.
    pub charge_delivery_on_empty: bool,
}

impl FeeSchedule {
    /// Creates a schedule with the default tax label.
    pub fn new(delivery_fee: Money, other_fee: Money, tax_rate: TaxRate) -> Self {
        FeeSchedule {
            delivery_fee,
            other_fee,
            tax_rate,
            ..FeeSchedule::default()
        }
    }

    /// Label for the tax line, e.g. `GST (18%)`.
    pub fn tax_line_label(&self) -> String {
        format!("{} ({})", self.tax_label, self.tax_rate)
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule {
            delivery_fee: Money::from_units(50),
            other_fee: Money::zero(),
            tax_rate: TaxRate::from_bps(1800),
            tax_label: "GST".to_string(),
            charge_delivery_on_empty: true,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
