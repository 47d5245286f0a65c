//! # State Module
//!
//! Separate state types, each with a single responsibility; commands take
//! exactly the state they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────┐      │
//! │  │ ConfigState  │  │  CatalogState    │  │     CartState        │      │
//! │  │              │  │                  │  │                      │      │
//! │  │ fees, URLs,  │  │ Arc<RwLock<      │  │ Arc<Mutex<CartStore>>│      │
//! │  │ currency     │  │  CatalogStatus>> │  │ + BillCalculator     │      │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ConfigState: read-only after startup                                │
//! │  • CatalogState: replaced whole, readers clone the Arc                 │
//! │  • CartState: one mutation at a time                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;

pub use cart::{CartResponse, CartState};
pub use catalog::{CatalogState, CatalogStatus};
pub use config::{ConfigError, ConfigResult, ConfigState};
