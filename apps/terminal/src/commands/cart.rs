//! # Cart Commands
//!
//! Cart manipulation. Every command answers with the full cart and a
//! freshly computed bill.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────────┐                    │
//! │  │  Empty   │────►│ In Cart  │────►│  Checkout    │                    │
//! │  │  Cart    │     │          │     │  handed off  │                    │
//! │  └──────────┘     └──────────┘     └──────────────┘                    │
//! │       ▲                │                  │                             │
//! │       │           add_to_cart         buy_now                          │
//! │       │           increase/decrease   (checkout.rs)                    │
//! │       │           remove_from_cart        │                             │
//! │       │                │                  │                             │
//! │       └── clear_cart ──┴──────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use crate::commands::catalog::{parse_product_id, require_catalog};
use crate::error::ApiError;
use crate::state::{CartResponse, CartState, CatalogState};

/// Current cart contents and bill.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.response()
}

/// Adds one unit of a catalog product.
///
/// ## Errors
/// - `NOT_FOUND`: unknown or unavailable product
/// - `CART_ERROR`: line or cart bound reached
/// - `CATALOG_ERROR`: catalog not loaded
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "add_to_cart command");

    let id = parse_product_id(product_id)?;
    let catalog = require_catalog(catalog)?;

    cart.with_cart_mut(|c| -> Result<CartResponse, ApiError> {
        c.add(&catalog, &id)?;
        Ok(cart.response_for(c))
    })
}

/// Increments an existing line by one.
pub fn increase_quantity(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "increase_quantity command");

    let id = parse_product_id(product_id)?;
    cart.with_cart_mut(|c| -> Result<CartResponse, ApiError> {
        c.increase(&id)?;
        Ok(cart.response_for(c))
    })
}

/// Decrements a line by one; the line disappears at zero.
pub fn decrease_quantity(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "decrease_quantity command");

    let id = parse_product_id(product_id)?;
    cart.with_cart_mut(|c| -> Result<CartResponse, ApiError> {
        c.decrease(&id)?;
        Ok(cart.response_for(c))
    })
}

/// Removes a line regardless of quantity. Removing an absent line is a
/// no-op.
pub fn remove_from_cart(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    let id = parse_product_id(product_id)?;
    Ok(cart.with_cart_mut(|c| {
        c.remove(&id);
        cart.response_for(c)
    }))
}

/// Empties the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        cart.response_for(c)
    })
}
