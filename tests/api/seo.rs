use crate::helpers::spawn_app;

#[tokio::test]
async fn sitemap_lists_every_page() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.get("/sitemap.xml").await;

    // Assert
    assert_eq!(200, response.status().as_u16());
    assert_eq!(response.headers()["content-type"], "application/xml");
    let body = response.text().await.unwrap();
    for path in ["/about", "/services", "/portfolio", "/contact"] {
        assert!(
            body.contains(&format!("<loc>https://agency.example{path}</loc>")),
            "{path} is missing from the sitemap"
        );
    }
}

#[tokio::test]
async fn robots_txt_points_to_the_sitemap() {
    let app = spawn_app().await;

    let response = app.get("/robots.txt").await;

    assert_eq!(200, response.status().as_u16());
    let body = response.text().await.unwrap();
    assert!(body.contains("Sitemap: https://agency.example/sitemap.xml"));
}
