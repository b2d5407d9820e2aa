//! Analytics collaborator.
//!
//! Cart mutations and completed checkouts are reported to an
//! [`AnalyticsSink`] as fire-and-forget events. The store itself never
//! depends on the sink - route handlers report after a mutation succeeds,
//! and a sink that does nothing is perfectly valid.

use serde::Serialize;

use solstice_core::{OrderId, Price, Product, ProductId};

/// Snapshot of the product affected by a cart mutation.
#[derive(Debug, Clone, Serialize)]
pub struct ItemSnapshot {
    pub item_id: ProductId,
    pub item_name: String,
    pub item_category: String,
    pub price: Price,
    pub quantity: u32,
}

impl ItemSnapshot {
    /// Capture a snapshot of `product` at `quantity` units.
    #[must_use]
    pub fn of(product: &Product, quantity: u32) -> Self {
        Self {
            item_id: product.id.clone(),
            item_name: product.name.clone(),
            item_category: product.category.clone(),
            price: product.price,
            quantity,
        }
    }
}

/// Fire-and-forget event sink.
///
/// Implementations must not fail and must not block the request path.
pub trait AnalyticsSink: Send + Sync {
    /// An item was added to a cart.
    fn add_to_cart(&self, item: ItemSnapshot);

    /// An item was removed from a cart.
    fn remove_from_cart(&self, item: ItemSnapshot);

    /// A simulated checkout completed.
    fn purchase(&self, order_id: &OrderId, total: Price, item_count: u32);
}

/// Default sink: structured tracing events.
///
/// The demo has no analytics backend; events land in the log where they can
/// be inspected. A GA4 measurement id in configuration additionally enables
/// the client-side tag in templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn add_to_cart(&self, item: ItemSnapshot) {
        tracing::info!(
            target: "solstice::analytics",
            item_id = %item.item_id,
            item_name = %item.item_name,
            price = %item.price,
            quantity = item.quantity,
            "add_to_cart"
        );
    }

    fn remove_from_cart(&self, item: ItemSnapshot) {
        tracing::info!(
            target: "solstice::analytics",
            item_id = %item.item_id,
            item_name = %item.item_name,
            price = %item.price,
            quantity = item.quantity,
            "remove_from_cart"
        );
    }

    fn purchase(&self, order_id: &OrderId, total: Price, item_count: u32) {
        tracing::info!(
            target: "solstice::analytics",
            order_id = %order_id,
            total = %total,
            item_count,
            "purchase"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solstice_core::Price;

    #[test]
    fn test_snapshot_captures_product_state() {
        let product = Product {
            id: ProductId::new("4"),
            name: "Eco-Friendly Water Bottle".to_owned(),
            description: String::new(),
            price: Price::from_cents(3999),
            image: String::new(),
            category: "Lifestyle".to_owned(),
            rating: 4.7,
            reviews: 156,
            in_stock: true,
            featured: true,
        };

        let snapshot = ItemSnapshot::of(&product, 3);
        assert_eq!(snapshot.item_id, ProductId::new("4"));
        assert_eq!(snapshot.item_category, "Lifestyle");
        assert_eq!(snapshot.price, Price::from_cents(3999));
        assert_eq!(snapshot.quantity, 3);
    }
}
