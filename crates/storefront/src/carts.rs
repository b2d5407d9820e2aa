//! Session cart registry.
//!
//! Each browser session owns one [`CartStore`]. The session cookie carries a
//! generated [`CartId`]; this registry maps cart ids to shared store handles.
//! Carts idle longer than the session lifetime are evicted - they were
//! unreachable anyway. Nothing here touches disk.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use moka::sync::Cache;
use uuid::Uuid;

use solstice_core::CartId;
use solstice_core::cart::CartStore;

/// Shared handle to one session's cart.
pub type CartHandle = Arc<Mutex<CartStore>>;

/// How long an untouched cart survives (matches session expiry: 7 days).
const CART_IDLE_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Upper bound on live carts; far above anything a demo will see.
const MAX_CARTS: u64 = 100_000;

/// In-memory registry of session carts.
#[derive(Clone)]
pub struct CartRegistry {
    carts: Cache<CartId, CartHandle>,
}

impl CartRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            carts: Cache::builder()
                .max_capacity(MAX_CARTS)
                .time_to_idle(Duration::from_secs(CART_IDLE_SECONDS))
                .build(),
        }
    }

    /// Generate a fresh cart id for a new session.
    #[must_use]
    pub fn mint_id() -> CartId {
        CartId::new(Uuid::new_v4().to_string())
    }

    /// Look up an existing cart. `None` means the session never had one or
    /// it expired - callers treat both as an empty cart.
    #[must_use]
    pub fn get(&self, id: &CartId) -> Option<CartHandle> {
        self.carts.get(id)
    }

    /// Fetch the cart for `id`, creating an empty one if needed.
    #[must_use]
    pub fn get_or_create(&self, id: &CartId) -> CartHandle {
        self.carts
            .get_with(id.clone(), || Arc::new(Mutex::new(CartStore::new())))
    }
}

impl Default for CartRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock a cart handle, recovering from poisoning (one panicked request must
/// not wedge the session's cart forever).
pub fn lock_cart(handle: &CartHandle) -> MutexGuard<'_, CartStore> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_id_returns_same_cart() {
        let registry = CartRegistry::new();
        let id = CartRegistry::mint_id();

        let first = registry.get_or_create(&id);
        lock_cart(&first).add(
            solstice_core::Product {
                id: solstice_core::ProductId::new("1"),
                name: "Test".to_owned(),
                description: String::new(),
                price: solstice_core::Price::from_cents(100),
                image: String::new(),
                category: "Home".to_owned(),
                rating: 4.0,
                reviews: 1,
                in_stock: true,
                featured: false,
            },
            2,
        );

        let second = registry.get_or_create(&id);
        assert_eq!(lock_cart(&second).total_items(), 2);
    }

    #[test]
    fn test_distinct_ids_get_distinct_carts() {
        let registry = CartRegistry::new();
        let a = registry.get_or_create(&CartRegistry::mint_id());
        let b = registry.get_or_create(&CartRegistry::mint_id());
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_get_without_create() {
        let registry = CartRegistry::new();
        assert!(registry.get(&CartRegistry::mint_id()).is_none());
    }

    #[test]
    fn test_mint_id_is_unique() {
        assert_ne!(CartRegistry::mint_id(), CartRegistry::mint_id());
    }
}
