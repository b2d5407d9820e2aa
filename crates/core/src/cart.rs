//! Shopping cart store with derived totals.
//!
//! [`CartStore`] owns the authoritative in-memory cart for one shopper and
//! funnels every mutation through its declared operations. Totals are
//! derived on demand rather than stored; with carts this small there is
//! nothing to cache.
//!
//! The store is an observer-pattern subject: each mutation synchronously
//! notifies every registered subscriber with the new line-item slice so a
//! binding layer can re-render. That notification is the store's only side
//! effect - it performs no I/O and none of its operations can fail.

use crate::types::{Price, Product, ProductId};

/// One (product, quantity) pairing inside the cart.
///
/// Invariant: `quantity >= 1` for as long as the line item exists. A
/// mutation that would drive the quantity below 1 removes the line item
/// instead.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    product: Product,
    quantity: u32,
}

impl LineItem {
    /// The product this line refers to.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    /// Units of the product in the cart. Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Exact price of this line (`unit price x quantity`).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Handle identifying one subscription, for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn Fn(&[LineItem]) + Send + Sync>;

/// The in-memory shopping cart.
///
/// Line items keep insertion order: the first product added appears first.
/// At most one line item exists per product id - adding a product that is
/// already present increments its quantity instead of appending a duplicate.
///
/// Every operation is total: removing or updating a product that is not in
/// the cart is a no-op, never an error.
#[derive(Default)]
pub struct CartStore {
    items: Vec<LineItem>,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: u64,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` units of `product` to the cart.
    ///
    /// A quantity of 0 is an implementation error on the caller's side; the
    /// store clamps it to 1 rather than silently dropping the add. If the
    /// product is already in the cart its quantity is incremented
    /// (saturating); otherwise a new line item is appended.
    ///
    /// No stock-limit enforcement happens here - the stock flag is purely
    /// informational.
    pub fn add(&mut self, product: Product, quantity: u32) {
        let quantity = quantity.max(1);

        if let Some(item) = self.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(LineItem { product, quantity });
        }

        self.notify();
    }

    /// Remove the line item for `product_id`, if present. No-op when absent.
    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|i| &i.product.id != product_id);
        self.notify();
    }

    /// Set the quantity for `product_id` exactly (not additive).
    ///
    /// A quantity of 0 behaves identically to [`remove`](Self::remove).
    /// No-op when the product is not in the cart.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.product.id == product_id) {
            item.quantity = quantity;
        }

        self.notify();
    }

    /// Empty the cart unconditionally.
    ///
    /// Called after a completed checkout and from the explicit clear
    /// affordance. Clearing an already-empty cart is fine.
    pub fn clear(&mut self) {
        self.items.clear();
        self.notify();
    }

    /// Total number of units across all line items. 0 for an empty cart.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |sum, i| sum.saturating_add(i.quantity))
    }

    /// Exact total price across all line items. Zero for an empty cart.
    ///
    /// The sum stays exact; rounding to 2 decimal places is a presentation
    /// concern.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Look up the line item for a product, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.product.id == product_id)
    }

    /// Register a callback invoked synchronously after every mutation.
    ///
    /// The callback receives the post-mutation line-item slice. Returns a
    /// handle for [`unsubscribe`](Self::unsubscribe).
    pub fn subscribe(&mut self, f: impl Fn(&[LineItem]) + Send + Sync + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_subscriber);
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(f)));
        id
    }

    /// Remove a previously registered subscriber. No-op for unknown handles.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    fn notify(&self) {
        for (_, subscriber) in &self.subscribers {
            subscriber(&self.items);
        }
    }
}

impl core::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::types::ProductId;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Price::from_cents(cents),
            image: String::new(),
            category: "Electronics".to_owned(),
            rating: 4.5,
            reviews: 10,
            in_stock: true,
            featured: false,
        }
    }

    #[test]
    fn test_empty_cart_totals() {
        let cart = CartStore::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_add_then_add_again_merges_line() {
        // Repeated adds of the same product id accumulate in one line item.
        let mut cart = CartStore::new();
        cart.add(product("x", 2999), 1);
        cart.add(product("x", 2999), 2);
        cart.add(product("x", 2999), 4);

        assert_eq!(cart.items().len(), 1);
        let line = cart.line(&ProductId::new("x")).expect("line exists");
        assert_eq!(line.quantity(), 7);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = CartStore::new();
        cart.add(product("a", 100), 1);
        cart.add(product("b", 200), 1);
        cart.add(product("a", 100), 1);

        let ids: Vec<&str> = cart
            .items()
            .iter()
            .map(|i| i.product().id.as_str())
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn test_add_zero_quantity_clamps_to_one() {
        let mut cart = CartStore::new();
        cart.add(product("x", 2999), 0);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_totals_scenario_a() {
        // addToCart(29.99 x 1) then addToCart(same, x 2)
        let mut cart = CartStore::new();
        cart.add(product("x", 2999), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price(), Price::from_cents(2999));

        cart.add(product("x", 2999), 2);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Price::from_cents(8997));
    }

    #[test]
    fn test_remove_scenario_b() {
        let mut cart = CartStore::new();
        cart.add(product("x", 2999), 3);
        cart.add(product("y", 1000), 1);

        cart.remove(&ProductId::new("x"));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(
            cart.items().first().map(|i| i.product().id.as_str()),
            Some("y")
        );
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price(), Price::from_cents(1000));
    }

    #[test]
    fn test_set_quantity_scenario_c() {
        // updateQuantity sets exactly, it does not add.
        let mut cart = CartStore::new();
        cart.add(product("x", 2999), 5);

        cart.set_quantity(&ProductId::new("x"), 1);

        let line = cart.line(&ProductId::new("x")).expect("line exists");
        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = CartStore::new();
        cart.add(product("x", 2999), 4);

        cart.set_quantity(&ProductId::new("x"), 0);

        assert!(cart.line(&ProductId::new("x")).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_and_update_absent_are_no_ops() {
        let mut cart = CartStore::new();
        cart.add(product("x", 2999), 2);

        cart.remove(&ProductId::new("ghost"));
        cart.set_quantity(&ProductId::new("ghost"), 9);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = CartStore::new();
        cart.clear();
        assert!(cart.is_empty());

        cart.add(product("x", 2999), 2);
        cart.clear();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), Price::ZERO);
    }

    #[test]
    fn test_line_total() {
        let mut cart = CartStore::new();
        cart.add(product("x", 2999), 3);
        let line = cart.line(&ProductId::new("x")).expect("line exists");
        assert_eq!(line.line_total(), Price::from_cents(8997));
    }

    #[test]
    fn test_subscribers_notified_on_every_mutation() {
        let mut cart = CartStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        cart.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        cart.add(product("x", 2999), 1);
        cart.set_quantity(&ProductId::new("x"), 3);
        cart.remove(&ProductId::new("x"));
        cart.clear();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_subscriber_sees_post_mutation_state() {
        let mut cart = CartStore::new();
        let last_count = Arc::new(AtomicUsize::new(usize::MAX));
        let seen = Arc::clone(&last_count);
        cart.subscribe(move |items| {
            let units: u32 = items.iter().map(LineItem::quantity).sum();
            seen.store(units as usize, Ordering::SeqCst);
        });

        cart.add(product("x", 2999), 2);
        assert_eq!(last_count.load(Ordering::SeqCst), 2);

        cart.clear();
        assert_eq!(last_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut cart = CartStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let id = cart.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        cart.add(product("x", 2999), 1);
        cart.unsubscribe(id);
        cart.add(product("y", 1000), 1);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
