//! Integration tests for Solstice.
//!
//! Each test boots the full storefront on an ephemeral port and drives it
//! over HTTP with a cookie-holding client. The storefront is entirely
//! in-memory, so tests need no database or external service and can run in
//! parallel - every [`TestApp`] is its own isolated universe.

use std::net::SocketAddr;
use std::path::Path;

use solstice_storefront::config::{AnalyticsConfig, StorefrontConfig};
use solstice_storefront::i18n::Locale;
use solstice_storefront::state::AppState;

/// A running storefront instance plus a client that holds its cookies.
pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Boot the storefront on an ephemeral port with a zero checkout delay.
    ///
    /// # Panics
    ///
    /// Panics on any setup failure; tests cannot proceed without the app.
    pub async fn spawn() -> Self {
        let storefront_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront");

        let config = StorefrontConfig {
            host: "127.0.0.1".parse().expect("valid bind address"),
            port: 0,
            base_url: "http://localhost".to_string(),
            default_locale: Locale::En,
            checkout_delay_ms: 0,
            content_dir: storefront_dir.join("content"),
            static_dir: storefront_dir.join("static"),
            analytics: AnalyticsConfig::default(),
        };

        let state = AppState::new(config).expect("application state builds");
        let app = solstice_storefront::app(state);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0))
            .await
            .expect("bind ephemeral port");
        let addr: SocketAddr = listener.local_addr().expect("listener has local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server runs");
        });

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("client builds");

        Self {
            base_url: format!("http://{addr}"),
            client,
        }
    }

    /// Absolute URL for a path on this instance.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Add a product to the session cart and return the count fragment body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the server rejects it.
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) -> String {
        let response = self
            .client
            .post(self.url("/en/cart/add"))
            .form(&[
                ("product_id", product_id.to_string()),
                ("quantity", quantity.to_string()),
            ])
            .send()
            .await
            .expect("add-to-cart request succeeds");
        assert!(
            response.status().is_success(),
            "add-to-cart failed: {}",
            response.status()
        );
        response
            .text()
            .await
            .expect("count fragment body")
            .trim()
            .to_owned()
    }
}
