//! Cart route handlers.
//!
//! Cart mutations return HTML fragments for dynamic updates without full
//! page reloads; the cart page embeds the same fragment. The session cookie
//! carries a cart id mapped to the in-memory cart registry - nothing is
//! persisted.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use solstice_core::cart::{CartStore, LineItem};
use solstice_core::{CartId, Price, ProductId};

use crate::analytics::ItemSnapshot;
use crate::carts::{CartHandle, CartRegistry, lock_cart};
use crate::error::AppError;
use crate::filters;
use crate::i18n::{Locale, Messages};
use crate::middleware::RequestLocale;
use crate::models::session_keys;
use crate::routes::{Chrome, checkout};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.product().id.to_string(),
            name: line.product().name.clone(),
            quantity: line.quantity(),
            price: line.product().price.to_string(),
            line_price: line.line_total().to_string(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub locale: Locale,
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty(locale: Locale) -> Self {
        Self {
            locale,
            items: Vec::new(),
            subtotal: Price::ZERO.to_string(),
            item_count: 0,
        }
    }

    /// Render the current state of a cart store.
    #[must_use]
    pub fn from_store(locale: Locale, store: &CartStore) -> Self {
        Self {
            locale,
            items: store.items().iter().map(CartItemView::from).collect(),
            subtotal: store.total_price().to_string(),
            item_count: store.total_items(),
        }
    }
}

/// Localized copy for the cart page and fragments.
pub struct CartStrings {
    pub title: String,
    pub empty: String,
    pub subtotal: String,
    pub remove: String,
    pub clear: String,
    pub checkout_title: String,
}

impl CartStrings {
    pub(crate) fn for_locale(messages: &Messages, locale: Locale) -> Self {
        Self {
            title: messages.get(locale, "cart.title").to_owned(),
            empty: messages.get(locale, "cart.empty").to_owned(),
            subtotal: messages.get(locale, "cart.subtotal").to_owned(),
            remove: messages.get(locale, "cart.remove").to_owned(),
            clear: messages.get(locale, "cart.clear").to_owned(),
            checkout_title: messages.get(locale, "cart.checkoutTitle").to_owned(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart id from the session.
async fn cart_id(session: &Session) -> Option<CartId> {
    session
        .get::<CartId>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Look up the session's cart, if it has one.
pub(crate) async fn existing_cart(session: &Session, state: &AppState) -> Option<CartHandle> {
    let id = cart_id(session).await?;
    state.carts().get(&id)
}

/// Fetch the session's cart, minting an id and an empty cart if needed.
async fn ensure_cart(session: &Session, state: &AppState) -> Result<CartHandle, AppError> {
    if let Some(id) = cart_id(session).await {
        return Ok(state.carts().get_or_create(&id));
    }

    let id = CartRegistry::mint_id();
    session
        .insert(session_keys::CART_ID, &id)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store cart id: {e}")))?;
    Ok(state.carts().get_or_create(&id))
}

/// Total units in the session's cart, for the navbar badge. 0 without a cart.
pub(crate) async fn session_count(session: &Session, state: &AppState) -> u32 {
    match existing_cart(session, state).await {
        Some(handle) => lock_cart(&handle).total_items(),
        None => 0,
    }
}

// =============================================================================
// Forms and Templates
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub chrome: Chrome,
    pub strings: CartStrings,
    pub checkout: checkout::CheckoutStrings,
    pub cart: CartView,
}

/// Cart items fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub strings: CartStrings,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(state, session))]
pub async fn show(
    RequestLocale(locale): RequestLocale,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let cart = match existing_cart(&session, &state).await {
        Some(handle) => CartView::from_store(locale, &lock_cart(&handle)),
        None => CartView::empty(locale),
    };

    CartShowTemplate {
        chrome: Chrome::build(&state, locale, cart.item_count),
        strings: CartStrings::for_locale(state.messages(), locale),
        checkout: checkout::CheckoutStrings::for_locale(state.messages(), locale),
        cart,
    }
}

/// Add an item to the cart.
///
/// Creates the session cart on first use. Returns the cart count fragment
/// plus a trigger header so other fragments refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let product_id = ProductId::new(form.product_id);
    let Some(product) = state.catalog().get(&product_id).cloned() else {
        return Err(AppError::NotFound(format!("product {product_id}")));
    };

    // The store clamps a zero quantity to 1; mirror that in the snapshot.
    let quantity = form.quantity.unwrap_or(1).max(1);

    let handle = ensure_cart(&session, &state).await?;
    let count = {
        let mut cart = lock_cart(&handle);
        cart.add(product.clone(), quantity);
        cart.total_items()
    };

    state
        .analytics()
        .add_to_cart(ItemSnapshot::of(&product, quantity));

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Set a line's quantity exactly (0 removes the line).
#[instrument(skip(state, session))]
pub async fn update(
    RequestLocale(locale): RequestLocale,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Response {
    let strings = CartStrings::for_locale(state.messages(), locale);

    let Some(handle) = existing_cart(&session, &state).await else {
        return CartItemsTemplate {
            strings,
            cart: CartView::empty(locale),
        }
        .into_response();
    };

    let cart = {
        let mut store = lock_cart(&handle);
        store.set_quantity(&ProductId::new(form.product_id), form.quantity);
        CartView::from_store(locale, &store)
    };

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { strings, cart },
    )
        .into_response()
}

/// Remove an item from the cart.
#[instrument(skip(state, session))]
pub async fn remove(
    RequestLocale(locale): RequestLocale,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Response {
    let strings = CartStrings::for_locale(state.messages(), locale);

    let Some(handle) = existing_cart(&session, &state).await else {
        return CartItemsTemplate {
            strings,
            cart: CartView::empty(locale),
        }
        .into_response();
    };

    let product_id = ProductId::new(form.product_id);
    let (removed, cart) = {
        let mut store = lock_cart(&handle);
        let removed = store
            .line(&product_id)
            .map(|line| ItemSnapshot::of(line.product(), line.quantity()));
        store.remove(&product_id);
        (removed, CartView::from_store(locale, &store))
    };

    if let Some(snapshot) = removed {
        state.analytics().remove_from_cart(snapshot);
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { strings, cart },
    )
        .into_response()
}

/// Empty the cart unconditionally.
#[instrument(skip(state, session))]
pub async fn clear(
    RequestLocale(locale): RequestLocale,
    State(state): State<AppState>,
    session: Session,
) -> Response {
    let strings = CartStrings::for_locale(state.messages(), locale);

    if let Some(handle) = existing_cart(&session, &state).await {
        lock_cart(&handle).clear();
    }

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            strings,
            cart: CartView::empty(locale),
        },
    )
        .into_response()
}

/// Get the cart count badge fragment.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    CartCountTemplate {
        count: session_count(&session, &state).await,
    }
}
