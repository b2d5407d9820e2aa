//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use solstice_core::Product;

use crate::filters;
use crate::i18n::{Locale, Messages};
use crate::middleware::RequestLocale;
use crate::routes::{Chrome, cart};
use crate::state::AppState;

/// Section ids on the landing page, in document order.
///
/// The navbar links target these anchors; the client-side scroll spy tracks
/// them with a 100-pixel offset to highlight the entry in view.
pub const SECTION_IDS: [&str; 4] = ["hero", "about", "showcase", "contact"];

/// Product display data for the showcase grid.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
        }
    }
}

/// Localized copy for the landing page sections.
pub struct HomeStrings {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_cta: String,
    pub about_title: String,
    pub about_body: String,
    pub showcase_title: String,
    pub showcase_subtitle: String,
    pub contact_title: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_message: String,
    pub contact_submit: String,
    pub add_to_cart: String,
}

impl HomeStrings {
    fn for_locale(messages: &Messages, locale: Locale) -> Self {
        Self {
            hero_title: messages.get(locale, "hero.title").to_owned(),
            hero_subtitle: messages.get(locale, "hero.subtitle").to_owned(),
            hero_cta: messages.get(locale, "hero.cta").to_owned(),
            about_title: messages.get(locale, "about.title").to_owned(),
            about_body: messages.get(locale, "about.body").to_owned(),
            showcase_title: messages.get(locale, "showcase.title").to_owned(),
            showcase_subtitle: messages.get(locale, "showcase.subtitle").to_owned(),
            contact_title: messages.get(locale, "contact.title").to_owned(),
            contact_name: messages.get(locale, "contact.name").to_owned(),
            contact_email: messages.get(locale, "contact.email").to_owned(),
            contact_message: messages.get(locale, "contact.message").to_owned(),
            contact_submit: messages.get(locale, "contact.submit").to_owned(),
            add_to_cart: messages.get(locale, "shop.addToCart").to_owned(),
        }
    }
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: Chrome,
    pub strings: HomeStrings,
    pub featured: Vec<ProductCardView>,
}

/// Display the landing page.
#[instrument(skip(state, session))]
pub async fn home(
    RequestLocale(locale): RequestLocale,
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let cart_count = cart::session_count(&session, &state).await;

    HomeTemplate {
        chrome: Chrome::build(&state, locale, cart_count),
        strings: HomeStrings::for_locale(state.messages(), locale),
        featured: state
            .catalog()
            .featured()
            .map(ProductCardView::from)
            .collect(),
    }
}
