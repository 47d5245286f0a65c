//! # Catalog Records
//!
//! The product service serves spreadsheet-style records:
//!
//! ```json
//! {
//!   "ID": 1,
//!   "Name": "Masala Chai",
//!   "Short Description": "Spiced milk tea",
//!   "Long Description": "Assam tea brewed with ginger and cardamom.",
//!   "Image URL": "https://cdn.example/chai.png",
//!   "Price": 100,
//!   "Available": "yes"
//! }
//! ```
//!
//! Every field is optional on the wire. `into_product` decides what is
//! acceptable and produces a typed [`Product`].

use serde::Deserialize;
use storefront_core::validation::{validate_price, validate_product_id, validate_product_name};
use storefront_core::{Money, Product, ProductId, ValidationError};

/// A number-or-text cell as spreadsheets export it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(serde_json::Number),
    Text(String),
    Flag(bool),
}

/// One product record exactly as served.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogRecord {
    #[serde(rename = "ID")]
    pub id: Option<Cell>,

    #[serde(rename = "Name")]
    pub name: Option<String>,

    #[serde(rename = "Short Description")]
    pub short_description: Option<String>,

    #[serde(rename = "Long Description")]
    pub long_description: Option<String>,

    #[serde(rename = "Image URL")]
    pub image_url: Option<String>,

    #[serde(rename = "Price")]
    pub price: Option<Cell>,

    #[serde(rename = "Available")]
    pub available: Option<Cell>,
}

impl CatalogRecord {
    /// Validates the record and converts it into a typed product.
    ///
    /// ## Rules
    /// - `ID`: required, number or text; whole numbers become decimal text
    /// - `Name`: required, non-empty, no control characters
    /// - `Price`: required, non-negative, at most two decimal places and
    ///   `MAX_AMOUNT_UNITS` (number or numeric text)
    /// - `Available`: `"yes"` (any case, trimmed) or `true` means available;
    ///   anything else, including a missing cell, means out of stock
    pub fn into_product(self) -> Result<Product, ValidationError> {
        let id = match self.id {
            Some(cell) => id_text(&cell)?,
            None => return Err(required("id")),
        };
        validate_product_id(&id)?;

        let name = self.name.map(|n| n.trim().to_string()).unwrap_or_default();
        validate_product_name(&name)?;

        let price = match self.price {
            Some(cell) => parse_price(&cell)?,
            None => return Err(required("price")),
        };

        let available = self.available.as_ref().map(is_yes).unwrap_or(false);

        Ok(Product::new(ProductId::new(id), name, price)
            .with_available(available)
            .with_details(
                self.short_description.unwrap_or_default(),
                self.long_description.unwrap_or_default(),
                self.image_url.unwrap_or_default(),
            ))
    }
}

fn required(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn id_text(cell: &Cell) -> Result<String, ValidationError> {
    match cell {
        Cell::Text(text) => Ok(text.trim().to_string()),
        Cell::Number(n) => {
            if let Some(i) = n.as_u64() {
                Ok(i.to_string())
            } else if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.is_finite() => Ok(format!("{:.0}", f)),
                    _ => Ok(n.to_string()),
                }
            }
        }
        Cell::Flag(_) => Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must be a number or text".to_string(),
        }),
    }
}

fn parse_price(cell: &Cell) -> Result<Money, ValidationError> {
    let value = match cell {
        Cell::Number(n) => n.as_f64(),
        Cell::Text(text) => text.trim().parse::<f64>().ok(),
        Cell::Flag(_) => None,
    };

    match value {
        Some(v) => validate_price(v),
        None => Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be numeric".to_string(),
        }),
    }
}

fn is_yes(cell: &Cell) -> bool {
    match cell {
        Cell::Text(text) => text.trim().eq_ignore_ascii_case("yes"),
        Cell::Flag(flag) => *flag,
        Cell::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> CatalogRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_record() {
        let product = record(json!({
            "ID": 1,
            "Name": "Masala Chai",
            "Short Description": "Spiced tea",
            "Long Description": "Assam tea with ginger.",
            "Image URL": "https://cdn.example/chai.png",
            "Price": 100,
            "Available": "Yes"
        }))
        .into_product()
        .unwrap();

        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.name, "Masala Chai");
        assert_eq!(product.price, Money::from_units(100));
        assert!(product.available);
        assert_eq!(product.image_url, "https://cdn.example/chai.png");
    }

    #[test]
    fn test_text_cells_accepted() {
        let product = record(json!({
            "ID": " sku-7 ",
            "Name": "Samosa",
            "Price": "30",
            "Available": " yes "
        }))
        .into_product()
        .unwrap();

        assert_eq!(product.id.as_str(), "sku-7");
        assert_eq!(product.price, Money::from_units(30));
        assert!(product.available);
        assert_eq!(product.short_description, "");
    }

    #[test]
    fn test_whole_float_id_normalised() {
        let product = record(json!({"ID": 3.0, "Name": "Lassi", "Price": 80.0, "Available": "yes"}))
            .into_product()
            .unwrap();
        assert_eq!(product.id.as_str(), "3");
        assert_eq!(product.price, Money::from_units(80));
    }

    #[test]
    fn test_fractional_price_accepted() {
        let product = record(json!({"ID": 5, "Name": "Vada Pav", "Price": 49.5, "Available": "yes"}))
            .into_product()
            .unwrap();
        assert_eq!(product.price, Money::from_minor(4950));

        let text = record(json!({"ID": 6, "Name": "Kulfi", "Price": "19.99"}))
            .into_product()
            .unwrap();
        assert_eq!(text.price, Money::from_minor(1999));
    }

    #[test]
    fn test_availability_values() {
        for (cell, expected) in [
            (json!("yes"), true),
            (json!("YES"), true),
            (json!(true), true),
            (json!("no"), false),
            (json!(""), false),
            (json!(1), false),
        ] {
            let product = record(json!({"ID": 1, "Name": "X", "Price": 1, "Available": cell}))
                .into_product()
                .unwrap();
            assert_eq!(product.available, expected);
        }

        let missing = record(json!({"ID": 1, "Name": "X", "Price": 1}))
            .into_product()
            .unwrap();
        assert!(!missing.available);
    }

    #[test]
    fn test_malformed_records_rejected() {
        let cases = [
            json!({"Name": "No id", "Price": 1}),
            json!({"ID": "", "Name": "Blank id", "Price": 1}),
            json!({"ID": 1, "Price": 1}),
            json!({"ID": 1, "Name": "  ", "Price": 1}),
            json!({"ID": 1, "Name": "No price"}),
            json!({"ID": 1, "Name": "Text price", "Price": "cheap"}),
            json!({"ID": 1, "Name": "Negative", "Price": -10}),
            json!({"ID": 1, "Name": "Sub-paisa", "Price": 9.999}),
            json!({"ID": 1, "Name": "Overflow", "Price": 1.0e16}),
            json!({"ID": 1, "Name": "Masala Chai x 1 - 0\nTOTAL: 0", "Price": 1}),
            json!({"ID": 1, "Name": "Tab\tname", "Price": 1}),
            json!({"ID": true, "Name": "Flag id", "Price": 1}),
        ];

        for case in cases {
            let result = record(case.clone()).into_product();
            assert!(result.is_err(), "expected rejection for {}", case);
        }
    }
}
