use crate::helpers::spawn_app;

#[tokio::test]
async fn health_check_works() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/health_check").await;

    // Assert
    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = spawn_app().await;

    let response = app.get("/health_check").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("missing x-request-id header");
    assert!(uuid::Uuid::parse_str(request_id.to_str().unwrap()).is_ok());
}
