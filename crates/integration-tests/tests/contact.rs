//! Contact form validation over HTTP.

use serde_json::{Value, json};
use solstice_integration_tests::TestApp;

async fn submit(app: &TestApp, locale: &str, payload: Value) -> (u16, Value) {
    let response = app
        .client
        .post(app.url(&format!("/{locale}/contact")))
        .json(&payload)
        .send()
        .await
        .expect("contact request completes");
    let status = response.status().as_u16();
    let body: Value = response.json().await.expect("JSON response body");
    (status, body)
}

#[tokio::test]
async fn valid_submission_succeeds() {
    let app = TestApp::spawn().await;

    let (status, body) = submit(
        &app,
        "en",
        json!({
            "name": "Robin",
            "email": "robin@example.com",
            "message": "I have a question about the headphones."
        }),
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn blank_name_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, body) = submit(
        &app,
        "en",
        json!({
            "name": "   ",
            "email": "robin@example.com",
            "message": "I have a question about the headphones."
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], json!("Please enter your name."));
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, body) = submit(
        &app,
        "en",
        json!({
            "name": "Robin",
            "email": "robin@nowhere",
            "message": "I have a question about the headphones."
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(
        body["message"],
        json!("Please enter a valid email address.")
    );
}

#[tokio::test]
async fn short_message_is_rejected() {
    let app = TestApp::spawn().await;

    let (status, body) = submit(
        &app,
        "en",
        json!({
            "name": "Robin",
            "email": "robin@example.com",
            "message": "Hi"
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(
        body["message"],
        json!("Your message must be at least 10 characters.")
    );
}

#[tokio::test]
async fn errors_are_localized() {
    let app = TestApp::spawn().await;

    let (status, body) = submit(
        &app,
        "es",
        json!({
            "name": "",
            "email": "robin@example.com",
            "message": "Tengo una pregunta sobre los auriculares."
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["message"], json!("Por favor, escribe tu nombre."));
}
