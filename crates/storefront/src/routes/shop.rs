//! Shop (catalog) route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use solstice_core::Product;

use crate::catalog::{CATEGORIES, CATEGORY_ALL};
use crate::filters;
use crate::i18n::{Locale, Messages};
use crate::middleware::RequestLocale;
use crate::routes::{Chrome, cart};
use crate::state::AppState;

/// Shop filter query parameters.
#[derive(Debug, Deserialize)]
pub struct ShopQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// One category tab with its pre-resolved link and active flag.
#[derive(Clone)]
pub struct CategoryTab {
    pub name: String,
    pub href: String,
    pub active: bool,
}

/// Product display data for the shop grid.
#[derive(Clone)]
pub struct ShopProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub rating: f32,
    pub reviews: u32,
    pub price: String,
    pub in_stock: bool,
}

impl From<&Product> for ShopProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category.clone(),
            rating: product.rating,
            reviews: product.reviews,
            price: product.price.to_string(),
            in_stock: product.in_stock,
        }
    }
}

/// Localized copy for the shop page.
pub struct ShopStrings {
    pub title: String,
    pub subtitle: String,
    pub search_placeholder: String,
    pub add_to_cart: String,
    pub out_of_stock: String,
    pub reviews: String,
}

impl ShopStrings {
    fn for_locale(messages: &Messages, locale: Locale) -> Self {
        Self {
            title: messages.get(locale, "shop.title").to_owned(),
            subtitle: messages.get(locale, "shop.subtitle").to_owned(),
            search_placeholder: messages.get(locale, "shop.searchPlaceholder").to_owned(),
            add_to_cart: messages.get(locale, "shop.addToCart").to_owned(),
            out_of_stock: messages.get(locale, "shop.outOfStock").to_owned(),
            reviews: messages.get(locale, "shop.reviews").to_owned(),
        }
    }
}

/// Shop page template.
#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
pub struct ShopIndexTemplate {
    pub chrome: Chrome,
    pub strings: ShopStrings,
    pub categories: Vec<CategoryTab>,
    pub products: Vec<ShopProductView>,
    pub category: String,
    pub query: String,
}

/// Display the shop page with category and search filters applied.
#[instrument(skip(state, session))]
pub async fn index(
    RequestLocale(locale): RequestLocale,
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<ShopQuery>,
) -> impl IntoResponse {
    // An unrecognized category degrades to "All" rather than 404ing.
    let category = params
        .category
        .filter(|c| CATEGORIES.contains(&c.as_str()))
        .unwrap_or_else(|| CATEGORY_ALL.to_owned());
    let query = params.q.unwrap_or_default();

    let products: Vec<ShopProductView> = state
        .catalog()
        .search(&category, &query)
        .into_iter()
        .map(ShopProductView::from)
        .collect();

    let categories = CATEGORIES
        .iter()
        .map(|name| CategoryTab {
            name: (*name).to_owned(),
            href: format!("/{locale}/shop?category={name}"),
            active: *name == category,
        })
        .collect();

    let cart_count = cart::session_count(&session, &state).await;

    ShopIndexTemplate {
        chrome: Chrome::build(&state, locale, cart_count),
        strings: ShopStrings::for_locale(state.messages(), locale),
        categories,
        products,
        category,
        query,
    }
}
