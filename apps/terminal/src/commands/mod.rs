//! # Commands Module
//!
//! One function per user action. The shell parses input and calls these;
//! each declares only the state it needs.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Startup fetch, product list and detail
//! ├── cart.rs      ◄─── Cart manipulation
//! └── checkout.rs  ◄─── Buy now
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs the catalog
//! fn list_products(catalog: &CatalogState)
//!
//! // Needs catalog and cart
//! fn add_to_cart(catalog: &CatalogState, cart: &CartState, id: &str)
//!
//! // Needs config, cart and a submitter
//! fn buy_now(config: &ConfigState, cart: &CartState, submitter: &dyn CheckoutSubmitter)
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::{
    add_to_cart, clear_cart, decrease_quantity, get_cart, increase_quantity, remove_from_cart,
};
pub use catalog::{get_product, list_products, load_catalog};
pub use checkout::buy_now;
