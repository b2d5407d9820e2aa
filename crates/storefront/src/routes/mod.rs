//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Redirect to the default locale
//! GET  /health                   - Health check
//!
//! # Per-locale site (en, es)
//! GET  /{locale}/                - Landing page (hero/about/showcase/contact)
//! GET  /{locale}/shop            - Catalog with category + search filters
//! GET  /{locale}/pages/{slug}    - Markdown informational pages
//! POST /{locale}/contact         - Contact form (JSON)
//!
//! # Cart (HTML fragments)
//! GET  /{locale}/cart            - Cart page
//! POST /{locale}/cart/add        - Add to cart (returns count fragment)
//! POST /{locale}/cart/update     - Set quantity (returns cart_items fragment)
//! POST /{locale}/cart/remove     - Remove item (returns cart_items fragment)
//! POST /{locale}/cart/clear      - Empty the cart (returns cart_items fragment)
//! GET  /{locale}/cart/count      - Cart count badge (fragment)
//!
//! # Checkout (simulated)
//! POST /{locale}/checkout        - Validate, wait, confirm, clear the cart
//! ```

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod home;
pub mod pages;
pub mod shop;

use axum::{
    Router,
    extract::State,
    response::Redirect,
    routing::{get, post},
};

use crate::config::AnalyticsConfig;
use crate::i18n::{Locale, Messages};
use crate::state::AppState;

/// Navigation and footer strings shared by every full page.
#[derive(Clone)]
pub struct NavStrings {
    pub home: String,
    pub about: String,
    pub showcase: String,
    pub contact: String,
    pub shop: String,
    pub cart: String,
    pub footer_tagline: String,
    pub privacy: String,
}

impl NavStrings {
    fn for_locale(messages: &Messages, locale: Locale) -> Self {
        Self {
            home: messages.get(locale, "nav.home").to_owned(),
            about: messages.get(locale, "nav.about").to_owned(),
            showcase: messages.get(locale, "nav.showcase").to_owned(),
            contact: messages.get(locale, "nav.contact").to_owned(),
            shop: messages.get(locale, "nav.shop").to_owned(),
            cart: messages.get(locale, "nav.cart").to_owned(),
            footer_tagline: messages.get(locale, "footer.tagline").to_owned(),
            privacy: messages.get(locale, "footer.privacy").to_owned(),
        }
    }
}

/// Per-request chrome consumed by the base template: locale, navigation
/// strings, analytics configuration, and the cart badge count.
#[derive(Clone)]
pub struct Chrome {
    pub locale: Locale,
    pub nav: NavStrings,
    pub analytics: AnalyticsConfig,
    pub cart_count: u32,
}

impl Chrome {
    /// Assemble the chrome for one rendered page.
    #[must_use]
    pub fn build(state: &AppState, locale: Locale, cart_count: u32) -> Self {
        Self {
            locale,
            nav: NavStrings::for_locale(state.messages(), locale),
            analytics: state.config().analytics.clone(),
            cart_count,
        }
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the per-locale site router.
pub fn site_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/shop", get(shop::index))
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::submit))
        .route("/contact", post(contact::submit))
        .route("/pages/{slug}", get(pages::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Bare root goes to the default locale
        .route("/", get(root_redirect))
        // Everything else lives under a locale prefix
        .nest("/{locale}", site_routes())
}

/// Redirect `/` to the configured default locale.
async fn root_redirect(State(state): State<AppState>) -> Redirect {
    Redirect::temporary(&format!("/{}", state.config().default_locale))
}
