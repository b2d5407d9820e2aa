//! Locale extraction from the request path.
//!
//! All site routes are nested under `/{locale}`. This extractor resolves
//! the matched segment to a [`Locale`], falling back to the configured
//! default for anything unrecognized - a mistyped locale shows the default
//! site rather than a 404.

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::i18n::Locale;
use crate::state::AppState;

/// The locale resolved for this request.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequestLocale(locale): RequestLocale) -> impl IntoResponse {
///     format!("locale: {locale}")
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequestLocale(pub Locale);

impl FromRequestParts<AppState> for RequestLocale {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let locale = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|Path(params)| {
                params
                    .get("locale")
                    .and_then(|value| value.parse::<Locale>().ok())
            })
            .unwrap_or(state.config().default_locale);

        Ok(Self(locale))
    }
}
