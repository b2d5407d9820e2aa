//! Catalog product record.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product in the demo catalog.
///
/// Products are loaded once from static catalog data and are immutable for
/// the lifetime of the process. The stock flag is informational only - the
/// presentation layer disables the add-to-cart affordance for out-of-stock
/// items, but nothing in the cart enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Short marketing description.
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Image path served from static assets.
    pub image: String,
    /// Category label (one of the catalog's category tabs).
    pub category: String,
    /// Average review rating, 0.0-5.0.
    pub rating: f32,
    /// Number of reviews behind the rating.
    pub reviews: u32,
    /// Whether the product is currently purchasable.
    pub in_stock: bool,
    /// Whether the product is highlighted on the landing page.
    #[serde(default)]
    pub featured: bool,
}

impl Product {
    /// Whether the rating falls in the displayable 0.0-5.0 range.
    #[must_use]
    pub fn has_valid_rating(&self) -> bool {
        (0.0..=5.0).contains(&self.rating)
    }
}
