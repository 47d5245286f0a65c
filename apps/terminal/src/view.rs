//! # Terminal Views
//!
//! Plain-text renderings of the storefront screens. Pure functions from
//! data to `String`; the shell decides where they go.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [1] Masala Chai                                            ₹100        │
//! │      Spiced milk tea                                                    │
//! │  [2] Samosa                                      ₹30  (Out of Stock)    │
//! │                                                                         │
//! │  Cart (3)                                                               │
//! │  Masala Chai x 2 - ₹200                                                 │
//! │  Samosa x 1 - ₹30                                                       │
//! │  Subtotal: ₹230                                                         │
//! │  Delivery: ₹50                                                          │
//! │  Other Fee: ₹0                                                          │
//! │  GST (18%): ₹41                                                         │
//! │  TOTAL: ₹321                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write;

use storefront_core::{BillSummary, Product};

use crate::checkout::CheckoutRequest;
use crate::state::{CartResponse, ConfigState};

/// The product grid, in provider order.
pub fn render_product_grid(products: &[Product], config: &ConfigState) -> String {
    if products.is_empty() {
        return "No products available.".to_string();
    }

    let mut out = String::new();
    for product in products {
        let _ = write!(
            out,
            "[{}] {}  {}",
            product.id,
            product.name,
            config.format_currency(product.price)
        );
        if !product.is_available() {
            out.push_str("  (Out of Stock)");
        }
        out.push('\n');
        if !product.short_description.is_empty() {
            let _ = writeln!(out, "    {}", product.short_description);
        }
    }
    out.truncate(out.trim_end().len());
    out
}

/// The detail view opened from the grid.
pub fn render_product_detail(product: &Product, config: &ConfigState) -> String {
    let mut out = format!("{}\n", product.name);
    if !product.long_description.is_empty() {
        let _ = writeln!(out, "{}", product.long_description);
    }
    if !product.image_url.is_empty() {
        let _ = writeln!(out, "Image: {}", product.image_url);
    }
    let _ = write!(out, "Price: {}", config.format_currency(product.price));
    if product.is_available() {
        let _ = write!(out, "\nType `add {}` to add it to your cart.", product.id);
    } else {
        out.push_str("\nOut of Stock");
    }
    out
}

/// Cart lines followed by the bill summary.
pub fn render_cart(cart: &CartResponse, config: &ConfigState) -> String {
    let mut out = format!("Cart ({})\n", cart.item_count);
    if cart.lines.is_empty() {
        out.push_str("Your cart is empty.\n");
    }
    for line in &cart.lines {
        let _ = writeln!(
            out,
            "{} x {} - {}",
            line.name,
            line.quantity,
            config.format_currency(line.line_total())
        );
    }
    out.push_str(&render_bill(&cart.bill, &cart.tax_line_label, config));
    out
}

/// The five-line bill summary.
pub fn render_bill(bill: &BillSummary, tax_line_label: &str, config: &ConfigState) -> String {
    format!(
        "Subtotal: {}\nDelivery: {}\nOther Fee: {}\n{}: {}\nTOTAL: {}",
        config.format_currency(bill.subtotal),
        config.format_currency(bill.delivery_fee),
        config.format_currency(bill.other_fee),
        tax_line_label,
        config.format_currency(bill.tax),
        config.format_currency(bill.total),
    )
}

/// Confirmation after a checkout handoff.
pub fn render_checkout(request: &CheckoutRequest) -> String {
    format!(
        "Order {} sent to checkout.\n{}\n\nOpen to complete payment:\n{}",
        request.reference, request.order_text, request.url
    )
}

pub fn render_help() -> String {
    [
        "Commands:",
        "  list          show all products",
        "  show <id>     product details",
        "  add <id>      add one to cart",
        "  inc <id>      increase quantity",
        "  dec <id>      decrease quantity",
        "  rm <id>       remove from cart",
        "  cart          show cart and bill",
        "  clear         empty the cart",
        "  buy           checkout",
        "  help          this message",
        "  quit          exit",
    ]
    .join("\n")
}
