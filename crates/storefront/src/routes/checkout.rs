//! Simulated checkout route handler.
//!
//! The checkout validates the form, waits a configurable "payment
//! processing" delay, and confirms with a generated order number. No payment
//! processor is contacted and nothing is persisted; the only durable effect
//! is that the session's cart is cleared.

use std::time::Duration;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use rand::Rng;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use solstice_core::{Email, OrderId};

use crate::carts::lock_cart;
use crate::error::AppError;
use crate::filters;
use crate::i18n::{Locale, Messages};
use crate::middleware::RequestLocale;
use crate::routes::{Chrome, cart};
use crate::state::AppState;

/// Localized labels for the checkout form (rendered on the cart page).
pub struct CheckoutStrings {
    pub place_order: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvc: String,
    pub name_on_card: String,
}

impl CheckoutStrings {
    pub(crate) fn for_locale(messages: &Messages, locale: Locale) -> Self {
        Self {
            place_order: messages.get(locale, "checkout.placeOrder").to_owned(),
            email: messages.get(locale, "checkout.form.email").to_owned(),
            first_name: messages.get(locale, "checkout.form.firstName").to_owned(),
            last_name: messages.get(locale, "checkout.form.lastName").to_owned(),
            address: messages.get(locale, "checkout.form.address").to_owned(),
            city: messages.get(locale, "checkout.form.city").to_owned(),
            postal_code: messages.get(locale, "checkout.form.postalCode").to_owned(),
            country: messages.get(locale, "checkout.form.country").to_owned(),
            card_number: messages.get(locale, "checkout.form.cardNumber").to_owned(),
            expiry_date: messages.get(locale, "checkout.form.expiryDate").to_owned(),
            cvc: messages.get(locale, "checkout.form.cvc").to_owned(),
            name_on_card: messages.get(locale, "checkout.form.nameOnCard").to_owned(),
        }
    }
}

/// Localized copy for the confirmation page.
pub struct ConfirmationStrings {
    pub confirmed_title: String,
    pub confirmed_body: String,
    pub order_number: String,
}

impl ConfirmationStrings {
    fn for_locale(messages: &Messages, locale: Locale) -> Self {
        Self {
            confirmed_title: messages.get(locale, "checkout.confirmedTitle").to_owned(),
            confirmed_body: messages.get(locale, "checkout.confirmedBody").to_owned(),
            order_number: messages.get(locale, "checkout.orderNumber").to_owned(),
        }
    }
}

/// Checkout form data: shipping information plus (never charged) payment
/// details.
#[derive(Deserialize)]
pub struct CheckoutForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub card_number: String,
    pub expiry_date: String,
    pub cvc: String,
    pub name_on_card: String,
}

impl CheckoutForm {
    /// Whether any field is blank after trimming.
    fn has_missing_field(&self) -> bool {
        [
            &self.email,
            &self.first_name,
            &self.last_name,
            &self.address,
            &self.city,
            &self.postal_code,
            &self.country,
            &self.card_number,
            &self.expiry_date,
            &self.cvc,
            &self.name_on_card,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
    }
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirmation.html")]
pub struct ConfirmationTemplate {
    pub chrome: Chrome,
    pub strings: ConfirmationStrings,
    pub order_number: String,
    pub total: String,
}

/// Submit the checkout form.
///
/// POST /{locale}/checkout
#[instrument(skip(state, session, form))]
pub async fn submit(
    RequestLocale(locale): RequestLocale,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, AppError> {
    let messages = state.messages();

    if form.has_missing_field() {
        return Err(AppError::BadRequest(
            messages.get(locale, "checkout.errors.missingField").to_owned(),
        ));
    }

    let email = Email::parse(&form.email).map_err(|_| {
        AppError::BadRequest(messages.get(locale, "checkout.errors.emailInvalid").to_owned())
    })?;

    let Some(handle) = cart::existing_cart(&session, &state).await else {
        return Err(AppError::BadRequest(
            messages.get(locale, "checkout.errors.emptyCart").to_owned(),
        ));
    };

    let (total, item_count) = {
        let store = lock_cart(&handle);
        if store.is_empty() {
            return Err(AppError::BadRequest(
                messages.get(locale, "checkout.errors.emptyCart").to_owned(),
            ));
        }
        (store.total_price(), store.total_items())
    };

    // Simulate payment processing
    tokio::time::sleep(Duration::from_millis(state.config().checkout_delay_ms)).await;

    let order_number: u32 = rand::rng().random_range(0..1_000_000);
    let order_id = OrderId::new(format!("SOL-{order_number:06}"));

    state.analytics().purchase(&order_id, total, item_count);
    tracing::info!(
        order = %order_id,
        email = %email,
        total = %total,
        items = item_count,
        "order placed"
    );

    // The order is "complete"; the cart starts over.
    lock_cart(&handle).clear();

    Ok(ConfirmationTemplate {
        chrome: Chrome::build(&state, locale, 0),
        strings: ConfirmationStrings::for_locale(messages, locale),
        order_number: order_id.to_string(),
        total: total.to_string(),
    }
    .into_response())
}
