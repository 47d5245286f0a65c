//! # Catalog Loading
//!
//! Turns a raw payload into a [`Catalog`], record by record. One bad record
//! is skipped and reported; it never sinks the whole catalog. A payload that
//! is not a JSON array is an error.

use std::collections::HashSet;

use serde::Serialize;
use storefront_core::Catalog;
use tracing::{debug, warn};

use crate::error::{CatalogError, CatalogResult};
use crate::record::CatalogRecord;

/// A record that did not make it into the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRecord {
    /// Zero-based position in the payload.
    pub position: usize,
    pub reason: String,
}

/// Result of one catalog load.
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    pub catalog: Catalog,
    pub rejected: Vec<RejectedRecord>,
}

/// Parses a catalog payload.
///
/// ## Errors
/// `Decode` if the payload is not a JSON array.
///
/// ## Example
/// ```rust
/// use storefront_catalog::parse_catalog;
///
/// let load = parse_catalog(r#"[
///     {"ID": 1, "Name": "Masala Chai", "Price": 100, "Available": "yes"},
///     {"ID": 2, "Name": "", "Price": 30, "Available": "yes"}
/// ]"#).unwrap();
///
/// assert_eq!(load.catalog.len(), 1);
/// assert_eq!(load.rejected.len(), 1);
/// ```
pub fn parse_catalog(payload: &str) -> CatalogResult<CatalogLoad> {
    let values: Vec<serde_json::Value> = serde_json::from_str(payload)?;
    from_values(values)
}

/// Builds a catalog from already decoded JSON values.
pub fn from_values(values: Vec<serde_json::Value>) -> CatalogResult<CatalogLoad> {
    let mut products = Vec::with_capacity(values.len());
    let mut rejected = Vec::new();
    let mut seen = HashSet::new();

    for (position, value) in values.into_iter().enumerate() {
        let outcome = serde_json::from_value::<CatalogRecord>(value)
            .map_err(|e| e.to_string())
            .and_then(|record| record.into_product().map_err(|e| e.to_string()));

        match outcome {
            Ok(product) if !seen.insert(product.id.clone()) => {
                let reason = format!("duplicate product ID {}", product.id);
                warn!(position, %reason, "Catalog record rejected");
                rejected.push(RejectedRecord { position, reason });
            }
            Ok(product) => products.push(product),
            Err(reason) => {
                warn!(position, %reason, "Catalog record rejected");
                rejected.push(RejectedRecord { position, reason });
            }
        }
    }

    let catalog = Catalog::new(products).map_err(CatalogError::from)?;
    debug!(
        products = catalog.len(),
        rejected = rejected.len(),
        "Catalog parsed"
    );

    Ok(CatalogLoad { catalog, rejected })
}
