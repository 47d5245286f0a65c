//! # Catalog State
//!
//! Holds the outcome of the startup catalog fetch.
//!
//! ```text
//! NotLoaded ──load_catalog()──► Loaded { catalog, rejected }
//!                         └───► Failed(reason)   → "Error loading products."
//! ```
//!
//! The catalog is swapped as a whole behind an `RwLock`; readers clone the
//! `Arc` and never hold the lock across rendering.

use std::sync::{Arc, PoisonError, RwLock};

use storefront_catalog::{CatalogLoad, RejectedRecord};
use storefront_core::Catalog;

/// Where the catalog stands.
#[derive(Debug, Clone, Default)]
pub enum CatalogStatus {
    #[default]
    NotLoaded,

    Loaded {
        catalog: Arc<Catalog>,
        rejected: Vec<RejectedRecord>,
    },

    /// Detailed cause; shown to the user only as the generic notice.
    Failed(String),
}

/// Managed catalog state.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    status: Arc<RwLock<CatalogStatus>>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State pre-populated with a catalog, for tests and offline use.
    pub fn loaded(catalog: Catalog) -> Self {
        let state = Self::new();
        state.set_loaded(CatalogLoad {
            catalog,
            rejected: Vec::new(),
        });
        state
    }

    pub fn set_loaded(&self, load: CatalogLoad) {
        self.replace(CatalogStatus::Loaded {
            catalog: Arc::new(load.catalog),
            rejected: load.rejected,
        });
    }

    pub fn set_failed(&self, reason: impl Into<String>) {
        self.replace(CatalogStatus::Failed(reason.into()));
    }

    pub fn status(&self) -> CatalogStatus {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, status: CatalogStatus) {
        *self.status.write().unwrap_or_else(PoisonError::into_inner) = status;
    }
}
