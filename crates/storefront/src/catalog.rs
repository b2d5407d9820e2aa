//! The demo product catalog.
//!
//! Products are embedded in the binary as JSON, parsed and validated once at
//! startup, and immutable for the lifetime of the process. Lookups are
//! linear scans; twelve products do not need an index.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use solstice_core::{Product, ProductId};

/// The embedded catalog document.
const CATALOG_JSON: &str = include_str!("../data/products.json");

/// The pseudo-category that selects every product.
pub const CATEGORY_ALL: &str = "All";

/// Category tabs in display order, matching the catalog data.
pub const CATEGORIES: [&str; 8] = [
    CATEGORY_ALL,
    "Electronics",
    "Clothing",
    "Lifestyle",
    "Accessories",
    "Health",
    "Home",
    "Food",
];

/// Errors detected while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog document is not valid JSON.
    #[error("catalog JSON is invalid: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A product has a price below zero.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// A product rating falls outside 0.0-5.0.
    #[error("product {0} has a rating outside 0.0-5.0")]
    RatingOutOfRange(ProductId),
}

/// The read-only product catalog.
///
/// Cheaply cloneable; the product list is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Load and validate the embedded catalog.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, duplicate ids, negative prices,
    /// or out-of-range ratings. Any of these is a build defect, caught at
    /// startup.
    pub fn load_embedded() -> Result<Self, CatalogError> {
        Self::from_json(CATALOG_JSON)
    }

    /// Parse and validate a catalog from a JSON document.
    ///
    /// # Errors
    ///
    /// See [`load_embedded`](Self::load_embedded).
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.clone()) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if product.price.is_negative() {
                return Err(CatalogError::NegativePrice(product.id.clone()));
            }
            if !product.has_valid_rating() {
                return Err(CatalogError::RatingOutOfRange(product.id.clone()));
            }
        }

        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// Every product, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products highlighted on the landing page.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.featured)
    }

    /// Products in a category; [`CATEGORY_ALL`] selects everything.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Product> {
        self.products
            .iter()
            .filter(move |p| category == CATEGORY_ALL || p.category == category)
    }

    /// Category filter plus case-insensitive name/description search.
    #[must_use]
    pub fn search(&self, category: &str, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| category == CATEGORY_ALL || p.category == category)
            .filter(|p| {
                needle.is_empty()
                    || p.name.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
