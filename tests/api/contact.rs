use serde_json::json;
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{spawn_app, spawn_app_without_access_key, SERVER_ACCESS_KEY};

fn valid_body() -> serde_json::Value {
    json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": "john@example.com",
        "message": "Hello, I need a website."
    })
}

#[tokio::test]
async fn contact_returns_success_when_the_form_api_accepts() {
    // Arrange
    let app = spawn_app().await;
    Mock::given(path("/submit"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&app.form_api_server)
        .await;

    // Act
    let response = app.post_contact(&valid_body()).await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": true, "message": ""}));
}

#[tokio::test]
async fn contact_sends_the_normalized_payload_with_the_server_key() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&app.form_api_server)
        .await;

    app.post_contact(&valid_body()).await;

    let requests = app.form_api_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(
        body,
        json!({
            "access_key": SERVER_ACCESS_KEY,
            "name": "John Doe",
            "email": "john@example.com",
            "subject": "Contact Form Submission",
            "message": "Hello, I need a website."
        })
    );
}

#[tokio::test]
async fn contact_reports_a_missing_access_key_without_calling_the_form_api() {
    let app = spawn_app_without_access_key().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_api_server)
        .await;

    let response = app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": false, "message": "Form service is not configured"})
    );
}

#[tokio::test]
async fn contact_returns_422_with_field_errors_for_invalid_data() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_api_server)
        .await;

    let response = app
        .post_contact(&json!({
            "firstName": "",
            "lastName": "Doe",
            "email": "x@y.com",
            "message": "short"
        }))
        .await;

    assert_eq!(422, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["errors"]["firstName"][0], "First name is required");
    assert_eq!(
        body["errors"]["message"][0],
        "Message must be at least 10 characters"
    );
    assert!(body["errors"].get("lastName").is_none());
}

#[tokio::test]
async fn contact_returns_422_when_fields_are_missing_or_invalid() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.form_api_server)
        .await;

    let test_cases = vec![
        (json!({"lastName": "Doe", "email": "x@y.com", "message": "Hello there, friends"}), "missing first name"),
        (json!({"firstName": "John", "email": "x@y.com", "message": "Hello there, friends"}), "missing last name"),
        (json!({"firstName": "John", "lastName": "Doe", "message": "Hello there, friends"}), "missing email"),
        (json!({"firstName": "John", "lastName": "Doe", "email": "not-an-email", "message": "Hello there, friends"}), "invalid email"),
        (json!({"firstName": "John", "lastName": "Doe", "email": "x@y.com"}), "missing message"),
        (json!({}), "empty body"),
    ];

    for (body, description) in test_cases {
        // Act
        let response = app.post_contact(&body).await;

        // Assert
        assert_eq!(
            422,
            response.status().as_u16(),
            "The API did not return a 422 Unprocessable Entity when the payload was {}",
            description
        );
    }
}

#[tokio::test]
async fn contact_reports_failure_when_the_form_api_errors() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.form_api_server)
        .await;

    let response = app.post_contact(&valid_body()).await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "message": ""}));
}

#[tokio::test]
async fn contact_reports_failure_when_the_form_api_returns_invalid_json() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&app.form_api_server)
        .await;

    let response = app.post_contact(&valid_body()).await;

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn contact_relays_the_message_of_a_remote_rejection() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Invalid access key"})),
        )
        .expect(1)
        .mount(&app.form_api_server)
        .await;

    let response = app.post_contact(&valid_body()).await;

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": false, "message": "Invalid access key"})
    );
}

#[tokio::test]
async fn repeated_submissions_are_not_deduplicated() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(2)
        .mount(&app.form_api_server)
        .await;

    for _ in 0..2 {
        let response = app.post_contact(&valid_body()).await;
        assert_eq!(200, response.status().as_u16());
    }
}
