//! # Catalog Providers
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────┐
//! │ Provider                 │ Source                                   │
//! ├──────────────────────────┼──────────────────────────────────────────┤
//! │ HttpCatalogProvider      │ GET {base_url}/products (http.rs)        │
//! │ FileCatalogProvider      │ local JSON file (offline / demo)         │
//! │ StaticCatalogProvider    │ in-memory payload (tests)                │
//! └──────────────────────────┴──────────────────────────────────────────┘
//! ```
//!
//! The catalog is fetched once at startup. Providers are the only layer
//! allowed to retry.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::CatalogResult;
use crate::load::{parse_catalog, CatalogLoad};

/// Source of product data.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Short description of the source, for logs.
    fn describe(&self) -> String;

    /// Fetches and validates the catalog.
    async fn fetch(&self) -> CatalogResult<CatalogLoad>;
}

// =============================================================================
// File Provider
// =============================================================================

/// Reads the catalog from a JSON file with the same shape the product
/// service serves.
#[derive(Debug, Clone)]
pub struct FileCatalogProvider {
    path: PathBuf,
}

impl FileCatalogProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCatalogProvider { path: path.into() }
    }
}

#[async_trait]
impl CatalogProvider for FileCatalogProvider {
    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }

    async fn fetch(&self) -> CatalogResult<CatalogLoad> {
        debug!(path = ?self.path, "Reading catalog file");
        let payload = tokio::fs::read_to_string(&self.path).await?;
        let load = parse_catalog(&payload)?;
        info!(
            path = ?self.path,
            products = load.catalog.len(),
            rejected = load.rejected.len(),
            "Catalog loaded from file"
        );
        Ok(load)
    }
}

// =============================================================================
// Static Provider
// =============================================================================

/// Serves a fixed payload.
#[derive(Debug, Clone)]
pub struct StaticCatalogProvider {
    payload: String,
}

impl StaticCatalogProvider {
    pub fn new(payload: impl Into<String>) -> Self {
        StaticCatalogProvider {
            payload: payload.into(),
        }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalogProvider {
    fn describe(&self) -> String {
        "static payload".to_string()
    }

    async fn fetch(&self) -> CatalogResult<CatalogLoad> {
        parse_catalog(&self.payload)
    }
}
