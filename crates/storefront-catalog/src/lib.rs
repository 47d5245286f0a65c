//! # storefront-catalog: Catalog Provider for the Storefront
//!
//! This crate is the only place that talks to the product service.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Catalog Load Pipeline                             │
//! │                                                                         │
//! │  GET {base}/products  ──or──  catalog.json                              │
//! │          │                         │                                    │
//! │          └────────────┬────────────┘                                    │
//! │                       ▼                                                 │
//! │            JSON array of wire records                                   │
//! │   { "ID": 1, "Name": "...", "Price": 100, "Available": "yes", ... }    │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │   CatalogRecord::into_product()  ◄── validation (record.rs)            │
//! │         │                  │                                            │
//! │         ▼                  ▼                                            │
//! │     Product           RejectedRecord (logged, counted)                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │   CatalogLoad { catalog: storefront_core::Catalog, rejected }          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`record`] - Wire record shape and validation
//! - [`load`] - Payload parsing into a [`CatalogLoad`]
//! - [`provider`] - The [`CatalogProvider`] trait, file and static providers
//! - [`http`] - HTTP provider with retry
//! - [`error`] - Catalog error types

pub mod error;
pub mod http;
pub mod load;
pub mod provider;
pub mod record;

pub use error::{CatalogError, CatalogResult};
pub use http::{HttpCatalogConfig, HttpCatalogProvider};
pub use load::{parse_catalog, CatalogLoad, RejectedRecord};
pub use provider::{CatalogProvider, FileCatalogProvider, StaticCatalogProvider};
pub use record::CatalogRecord;
