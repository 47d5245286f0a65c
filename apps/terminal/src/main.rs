//! # Storefront Entry Point
//!
//! The setup lives in lib.rs for better testability.
//!
//! ## Environment
//! - `STOREFRONT_CONFIG`: config file path (default: platform config dir)
//! - `STOREFRONT_CATALOG_URL` / `STOREFRONT_CATALOG_FILE`: catalog source
//! - `RUST_LOG`: log filter (logs go to stderr)

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    storefront_terminal::run().await
}
