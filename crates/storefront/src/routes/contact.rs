//! Contact form route handler.
//!
//! Validates submissions and logs them; the demo has no delivery backend,
//! matching the simulated submission flow of the rest of the site.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use solstice_core::Email;

use crate::middleware::RequestLocale;
use crate::state::AppState;

/// Minimum message length, matching the client-side validation.
const MIN_MESSAGE_CHARS: usize = 10;

/// Contact form data.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Submit the contact form.
///
/// POST /{locale}/contact
///
/// Validation failures return 400 with a localized, user-facing message.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    RequestLocale(locale): RequestLocale,
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> (StatusCode, Json<ContactResponse>) {
    let messages = state.messages();

    if form.name.trim().is_empty() {
        return failure(messages.get(locale, "contact.errors.nameRequired"));
    }

    let Ok(email) = Email::parse(&form.email) else {
        return failure(messages.get(locale, "contact.errors.emailInvalid"));
    };

    if form.message.trim().chars().count() < MIN_MESSAGE_CHARS {
        return failure(messages.get(locale, "contact.errors.messageTooShort"));
    }

    tracing::info!(
        name = %form.name.trim(),
        email = %email,
        locale = %locale,
        "contact form submission received"
    );

    (
        StatusCode::OK,
        Json(ContactResponse {
            success: true,
            message: Some(messages.get(locale, "contact.success").to_owned()),
        }),
    )
}

fn failure(message: &str) -> (StatusCode, Json<ContactResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ContactResponse {
            success: false,
            message: Some(message.to_owned()),
        }),
    )
}
