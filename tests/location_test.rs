use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::mock_app::MockApp;

fn save_request(city: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/air-monitoring/location")
        .method(Method::POST)
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "country": "Pakistan",
                "city": city,
                "regionName": "Sindh",
                "lon": 67.0011,
                "lat": 24.8607
            }))
            .unwrap(),
        ))
        .unwrap()
}

#[tokio::test]
async fn test_save_and_get_location() {
    let app = MockApp::new().await;

    let response = app.router.clone().oneshot(save_request("Karachi")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let request = Request::builder()
        .uri("/api/air-monitoring/location")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let location: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(location["city"], json!("Karachi"));
    assert_eq!(location["region_name"], json!("Sindh"));
}

#[tokio::test]
async fn test_second_save_supersedes_first() {
    let app = MockApp::new().await;

    app.router.clone().oneshot(save_request("Karachi")).await.unwrap();
    app.router.clone().oneshot(save_request("Hyderabad")).await.unwrap();

    let request = Request::builder()
        .uri("/api/air-monitoring/location")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let location: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(location["city"], json!("Hyderabad"));

    // Only one row survives
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sensor_locations")
        .fetch_one(app.storage.get_pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_save_location_missing_field() {
    let app = MockApp::new().await;

    let request = Request::builder()
        .uri("/api/air-monitoring/location")
        .method(Method::POST)
        .header("Content-Type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "country": "Pakistan",
                "city": "Karachi"
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_location_when_none_registered() {
    let app = MockApp::new().await;

    let request = Request::builder()
        .uri("/api/air-monitoring/location")
        .method(Method::GET)
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
