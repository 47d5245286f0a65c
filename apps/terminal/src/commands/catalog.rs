//! # Catalog Commands
//!
//! Startup fetch plus the read-only product queries behind the grid and
//! the detail view.

use std::sync::Arc;

use storefront_catalog::CatalogProvider;
use storefront_core::validation::validate_product_id;
use storefront_core::{Catalog, Product, ProductId};
use tracing::{debug, error, info};

use crate::error::{ApiError, ErrorCode};
use crate::state::{CatalogState, CatalogStatus};

/// Fetches the catalog once and records the outcome.
///
/// A failed fetch is not fatal: the state becomes `Failed` and the shell
/// shows "Error loading products.".
pub async fn load_catalog(
    provider: &dyn CatalogProvider,
    state: &CatalogState,
) -> Result<usize, ApiError> {
    info!(source = %provider.describe(), "Loading catalog");

    match provider.fetch().await {
        Ok(load) => {
            let count = load.catalog.len();
            if !load.rejected.is_empty() {
                info!(rejected = load.rejected.len(), "Some catalog records were skipped");
            }
            state.set_loaded(load);
            Ok(count)
        }
        Err(err) => {
            error!(error = %err, "Catalog load failed");
            state.set_failed(err.to_string());
            Err(err.into())
        }
    }
}

/// All products in provider order, available or not.
pub fn list_products(state: &CatalogState) -> Result<Vec<Product>, ApiError> {
    debug!("list_products command");
    Ok(require_catalog(state)?.products().to_vec())
}

/// One product for the detail view.
pub fn get_product(state: &CatalogState, id: &str) -> Result<Product, ApiError> {
    debug!(id = %id, "get_product command");
    let id = parse_product_id(id)?;

    require_catalog(state)?
        .get(&id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", id.as_str()))
}

/// The loaded catalog, or the error the shell should show.
pub(crate) fn require_catalog(state: &CatalogState) -> Result<Arc<Catalog>, ApiError> {
    match state.status() {
        CatalogStatus::Loaded { catalog, .. } => Ok(catalog),
        CatalogStatus::Failed(_) => Err(ApiError::catalog_unavailable()),
        CatalogStatus::NotLoaded => Err(ApiError::new(
            ErrorCode::CatalogError,
            "Products have not been loaded yet.",
        )),
    }
}

pub(crate) fn parse_product_id(id: &str) -> Result<ProductId, ApiError> {
    validate_product_id(id.trim()).map_err(|e| ApiError::validation(e.to_string()))?;
    Ok(ProductId::new(id))
}
