//! Session-related types.
//!
//! The demo keeps almost nothing in the session: just the cart id. The cart
//! contents themselves live in the in-memory registry, keyed by that id.

/// Session keys for stored values.
pub mod keys {
    /// Key for storing the session's cart id.
    pub const CART_ID: &str = "cart_id";
}
