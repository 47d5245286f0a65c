//! # Storefront Terminal
//!
//! Interactive storefront: browse the catalog, manage a cart, hand the
//! order off to checkout.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Terminal                              │
//! │                                                                         │
//! │  main.rs ────► tokio runtime, calls run()                              │
//! │                                                                         │
//! │  lib.rs ─────► tracing, config, catalog fetch, shell                   │
//! │                                                                         │
//! │  shell.rs ───► parses lines, dispatches commands                       │
//! │                                                                         │
//! │  commands/ ──► list_products, add_to_cart, buy_now, ...                │
//! │                                                                         │
//! │  state/ ─────► ConfigState, CatalogState, CartState                    │
//! │                                                                         │
//! │  view.rs ────► text rendering (₹ amounts)                              │
//! │                                                                         │
//! │  checkout.rs ► {base}/checkout?cart=<order text>                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//!          │                                   │
//!          ▼                                   ▼
//!  storefront-catalog                   storefront-core
//!  (HTTP / file provider)               (cart, bill, order text)
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr, so it does not mix with the shell)
//! 2. Load configuration (defaults → TOML file → `STOREFRONT_*` env)
//! 3. Fetch the catalog once; a failure leaves the shell usable
//! 4. Create the cart with the configured fee schedule
//! 5. Run the shell on stdin/stdout

pub mod checkout;
pub mod commands;
pub mod error;
pub mod shell;
pub mod state;
pub mod view;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use storefront_catalog::{
    CatalogProvider, CatalogResult, FileCatalogProvider, HttpCatalogConfig, HttpCatalogProvider,
};
use storefront_core::BillCalculator;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::checkout::LogSubmitter;
use crate::shell::Shell;
use crate::state::{CartState, CatalogState, ConfigState};

/// Runs the storefront until the user quits or input ends.
pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    let config_path = std::env::var_os("STOREFRONT_CONFIG").map(PathBuf::from);
    let config = ConfigState::load(config_path).context("Failed to load configuration")?;
    info!(store = %config.store_name, "Starting storefront");

    let catalog = CatalogState::new();
    match catalog_provider(&config).context("Invalid catalog source")? {
        Some(provider) => {
            // Failure is recorded in the state and reported by the shell.
            let _ = commands::load_catalog(provider.as_ref(), &catalog).await;
        }
        None => {
            warn!("No catalog source configured (set STOREFRONT_CATALOG_URL or STOREFRONT_CATALOG_FILE)");
            catalog.set_failed("no catalog source configured");
        }
    }

    let fees = config.fee_schedule().context("Invalid fee schedule")?;
    let cart = CartState::new(BillCalculator::new(fees));
    let shell = Shell::new(config, catalog, cart, Box::new(LogSubmitter));

    tokio::task::spawn_blocking(move || {
        let stdin = std::io::stdin();
        shell.run(stdin.lock(), std::io::stdout())
    })
    .await
    .context("Shell task panicked")?
    .context("Terminal I/O failed")?;

    info!("Storefront closed");
    Ok(())
}

/// Picks the catalog source: a local file wins over the product service.
pub fn catalog_provider(config: &ConfigState) -> CatalogResult<Option<Box<dyn CatalogProvider>>> {
    if let Some(path) = &config.catalog_file {
        return Ok(Some(Box::new(FileCatalogProvider::new(path))));
    }

    match &config.catalog_url {
        Some(url) => {
            let http = HttpCatalogConfig {
                timeout: Duration::from_secs(config.request_timeout_secs),
                max_retries: config.max_retries,
                ..HttpCatalogConfig::new(url.clone())
            };
            Ok(Some(Box::new(HttpCatalogProvider::new(http)?)))
        }
        None => Ok(None),
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for storefront crates only
/// - Default: warnings, plus info from the storefront crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,storefront=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_source_configured() {
        assert!(catalog_provider(&ConfigState::default()).unwrap().is_none());
    }

    #[test]
    fn test_file_wins_over_url() {
        let config = ConfigState {
            catalog_url: Some("https://shop.example.com/exec".into()),
            catalog_file: Some(PathBuf::from("/tmp/catalog.json")),
            ..ConfigState::default()
        };
        let provider = catalog_provider(&config).unwrap().unwrap();
        assert!(provider.describe().starts_with("file "));
    }

    #[test]
    fn test_url_provider() {
        let config = ConfigState {
            catalog_url: Some("https://shop.example.com/exec".into()),
            ..ConfigState::default()
        };
        let provider = catalog_provider(&config).unwrap().unwrap();
        assert_eq!(provider.describe(), "https://shop.example.com/exec/products");
    }
}
