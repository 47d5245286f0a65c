//! # Catalog
//!
//! Immutable, ordered product lookup built from whatever the Catalog
//! Provider returned. The cart resolves product IDs through it.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductId};

/// The products offered in this session, in provider order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    products: Vec<Product>,
    #[serde(skip)]
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog from typed products.
    ///
    /// ## Errors
    /// `DuplicateProduct` if two products share an ID.
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id.clone(), position).is_some() {
                return Err(CoreError::DuplicateProduct(product.id.to_string()));
            }
        }

        Ok(Catalog { products, index })
    }

    /// Looks up a product regardless of availability.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    /// Looks up a product that can be added to a cart.
    ///
    /// ## Errors
    /// `ProductNotFound` if the ID is unknown or the product is unavailable.
    pub fn resolve_available(&self, id: &ProductId) -> CoreResult<&Product> {
        self.get(id)
            .filter(|p| p.is_available())
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    /// All products in provider order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
