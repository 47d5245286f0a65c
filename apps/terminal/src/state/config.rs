//! # Configuration State
//!
//! Storefront configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_CATALOG_URL=https://script.example.com/exec             │
//! │     STOREFRONT_TAX_RATE=0.18                                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/...        │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ₹, delivery 50, other fee 0, GST 18%                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Chai Corner"
//! catalog_url = "https://script.example.com/macros/s/abc/exec"
//! currency_symbol = "₹"
//! delivery_fee = 50
//! other_fee = 0
//! tax_rate = 0.18
//! tax_label = "GST"
//! ```
//!
//! ## Thread Safety
//! Read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storefront_core::validation::{validate_fee, validate_tax_fraction};
use storefront_core::{FeeSchedule, Money, TaxRate, ValidationError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Shown in the shell banner
    pub store_name: String,

    /// Product service base URL (`GET {catalog_url}/products`)
    pub catalog_url: Option<String>,

    /// Local catalog JSON; takes precedence over `catalog_url`
    pub catalog_file: Option<PathBuf>,

    /// Checkout base URL; falls back to `catalog_url`
    pub checkout_url: Option<String>,

    /// Prefix for displayed amounts
    pub currency_symbol: String,

    /// Flat delivery fee in whole units, at most `MAX_AMOUNT_UNITS`
    pub delivery_fee: i64,

    /// Flat other fee in whole units, at most `MAX_AMOUNT_UNITS`
    pub other_fee: i64,

    /// Tax as a fraction, e.g. 0.18; must be a whole number of basis points
    pub tax_rate: f64,

    /// Name of the tax line
    pub tax_label: String,

    /// Charge delivery/other fee when the cart is empty
    pub charge_delivery_on_empty: bool,

    /// Per-request timeout for the product service
    pub request_timeout_secs: u64,

    /// Catalog fetch retries after the first attempt
    pub max_retries: u32,
}

impl Default for ConfigState {
    /// Defaults for the reference store.
    ///
    /// ## Default Values
    /// - Currency: ₹, whole units
    /// - Delivery 50, other fee 0
    /// - Tax: GST 18%
    /// - No catalog source (the shell reports "Error loading products.")
    fn default() -> Self {
        ConfigState {
            store_name: "Storefront".to_string(),
            catalog_url: None,
            catalog_file: None,
            checkout_url: None,
            currency_symbol: "₹".to_string(),
            delivery_fee: 50,
            other_fee: 0,
            tax_rate: 0.18,
            tax_label: "GST".to_string(),
            charge_delivery_on_empty: true,
            request_timeout_secs: 15,
            max_retries: 3,
        }
    }
}

impl ConfigState {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading storefront config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a config file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates fees, tax rate and URLs.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_fee("delivery_fee", self.delivery_fee)?;
        validate_fee("other_fee", self.other_fee)?;
        validate_tax_fraction(self.tax_rate)?;

        for (field, value) in [
            ("catalog_url", &self.catalog_url),
            ("checkout_url", &self.checkout_url),
        ] {
            if let Some(url) = value {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(ConfigError::Invalid(format!(
                        "{} must start with http:// or https://, got: {}",
                        field, url
                    )));
                }
            }
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup. Unparseable numbers are
    /// ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("STOREFRONT_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog_url = Some(url);
        }

        if let Some(path) = lookup("STOREFRONT_CATALOG_FILE") {
            debug!(path = %path, "Overriding catalog file from environment");
            self.catalog_file = Some(PathBuf::from(path));
        }

        if let Some(url) = lookup("STOREFRONT_CHECKOUT_URL") {
            self.checkout_url = Some(url);
        }

        if let Some(fee) = lookup("STOREFRONT_DELIVERY_FEE") {
            match fee.trim().parse::<i64>() {
                Ok(v) => self.delivery_fee = v,
                Err(_) => warn!(value = %fee, "Ignoring invalid STOREFRONT_DELIVERY_FEE"),
            }
        }

        if let Some(fee) = lookup("STOREFRONT_OTHER_FEE") {
            match fee.trim().parse::<i64>() {
                Ok(v) => self.other_fee = v,
                Err(_) => warn!(value = %fee, "Ignoring invalid STOREFRONT_OTHER_FEE"),
            }
        }

        if let Some(rate) = lookup("STOREFRONT_TAX_RATE") {
            match rate.trim().parse::<f64>() {
                Ok(v) => self.tax_rate = v,
                Err(_) => warn!(value = %rate, "Ignoring invalid STOREFRONT_TAX_RATE"),
            }
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Builds the fee schedule the bill calculator applies.
    pub fn fee_schedule(&self) -> ConfigResult<FeeSchedule> {
        validate_fee("delivery_fee", self.delivery_fee)?;
        validate_fee("other_fee", self.other_fee)?;

        Ok(FeeSchedule {
            delivery_fee: Money::from_units(self.delivery_fee),
            other_fee: Money::from_units(self.other_fee),
            tax_rate: TaxRate::from_fraction(self.tax_rate)?,
            tax_label: self.tax_label.clone(),
            charge_delivery_on_empty: self.charge_delivery_on_empty,
        })
    }

    /// Base URL for checkout handoff, if any.
    pub fn checkout_base(&self) -> Option<&str> {
        self.checkout_url
            .as_deref()
            .or(self.catalog_url.as_deref())
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::Money;
    /// use storefront_terminal::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_units(286)), "₹286");
    /// assert_eq!(config.format_currency(Money::from_minor(4950)), "₹49.5");
    /// assert_eq!(config.format_currency(Money::from_units(-5)), "-₹5");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            let magnitude = Money::from_minor(-amount.minor());
            format!("-{}{}", self.currency_symbol, magnitude)
        } else {
            format!("{}{}", self.currency_symbol, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_reference_store() {
        let config = ConfigState::default();
        let fees = config.fee_schedule().unwrap();

        assert_eq!(fees.delivery_fee, Money::from_units(50));
        assert_eq!(fees.other_fee, Money::zero());
        assert_eq!(fees.tax_rate.bps(), 1800);
        assert_eq!(fees.tax_line_label(), "GST (18%)");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_units(0)), "₹0");
        assert_eq!(config.format_currency(Money::from_units(1234)), "₹1234");
        assert_eq!(config.format_currency(Money::from_minor(1999)), "₹19.99");
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[
            ("STOREFRONT_CATALOG_URL", "https://api.example.com/exec"),
            ("STOREFRONT_DELIVERY_FEE", "40"),
            ("STOREFRONT_OTHER_FEE", "10"),
            ("STOREFRONT_TAX_RATE", "0.05"),
            ("STOREFRONT_CURRENCY_SYMBOL", "Rs "),
        ]));

        assert_eq!(config.catalog_url.as_deref(), Some("https://api.example.com/exec"));
        assert_eq!(config.checkout_base(), Some("https://api.example.com/exec"));
        assert_eq!(config.delivery_fee, 40);
        assert_eq!(config.other_fee, 10);
        assert_eq!(config.fee_schedule().unwrap().tax_rate.bps(), 500);
        assert_eq!(config.format_currency(Money::from_units(7)), "Rs 7");
    }

    #[test]
    fn test_invalid_numeric_override_ignored() {
        let mut config = ConfigState::default();
        config.apply_overrides(lookup(&[("STOREFRONT_DELIVERY_FEE", "fifty")]));
        assert_eq!(config.delivery_fee, 50);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = ConfigState {
            delivery_fee: -1,
            ..ConfigState::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = ConfigState {
            tax_rate: 1.5,
            ..ConfigState::default()
        };
        assert!(config.validate().is_err());

        let config = ConfigState {
            delivery_fee: i64::MAX,
            ..ConfigState::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
        assert!(config.fee_schedule().is_err());

        let config = ConfigState {
            tax_rate: 0.18125,
            ..ConfigState::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let config = ConfigState {
            catalog_url: Some("ftp://example.com".into()),
            ..ConfigState::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_checkout_url_preferred_over_catalog_url() {
        let config = ConfigState {
            catalog_url: Some("https://catalog.example.com".into()),
            checkout_url: Some("https://orders.example.com".into()),
            ..ConfigState::default()
        };
        assert_eq!(config.checkout_base(), Some("https://orders.example.com"));
    }

    #[test]
    fn test_toml_partial_file_uses_defaults() {
        let config: ConfigState = toml::from_str(
            r#"
            store_name = "Chai Corner"
            delivery_fee = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Chai Corner");
        assert_eq!(config.delivery_fee, 30);
        assert_eq!(config.currency_symbol, "₹");
        assert_eq!(config.tax_rate, 0.18);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ConfigState::load(Some(PathBuf::from(
            "/definitely/not/here/storefront.toml",
        )))
        .unwrap();
        assert_eq!(config.store_name, "Storefront");
    }
}
