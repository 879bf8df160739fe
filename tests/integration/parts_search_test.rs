// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use axum::{Extension, Router};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use partscout::infrastructure::cache::SessionCache;
use partscout::infrastructure::services::PartWebhookClient;
use partscout::presentation::middleware::{new_ip_limiter, IpRateLimiter};
use partscout::presentation::routes;

use super::helpers::{get, json_post, read_json};

fn app(webhook_url: &str, rate_limiter: Option<Arc<IpRateLimiter>>) -> Router {
    let cache = Arc::new(SessionCache::with_ttl_minutes(30));
    let client = Arc::new(PartWebhookClient::new(webhook_url.to_string(), 5));
    routes::routes(rate_limiter)
        .layer(Extension(cache))
        .layer(Extension(client))
}

fn valid_request() -> serde_json::Value {
    json!({
        "license_plate": "AB123CD",
        "part_name": "brake pads",
        "car_type": "BMW",
        "car_model_type": "5 G30",
        "car_model": "520d"
    })
}

#[tokio::test]
async fn test_missing_fields_rejected_with_single_message() {
    let app = app("http://127.0.0.1:9/webhook", None);

    let response = app
        .oneshot(json_post(
            "/v1/parts-search",
            json!({"license_plate": "AB123CD"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(
        body["error"],
        "Plate, part name, car type, car model type and car model are required"
    );
}

#[tokio::test]
async fn test_successful_search_creates_retrievable_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .and(body_partial_json(json!({
            "license_plate": "AB123CD",
            "part_name": "brake pads"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "brakes": ["https://shop.example/p/1", "https://shop.example/p/2"]
        })))
        .mount(&server)
        .await;

    let app = app(&format!("{}/webhook", server.uri()), None);

    let response = app
        .clone()
        .oneshot(json_post("/v1/parts-search", valid_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let body = read_json(response).await;
    let session_id = body["session_id"].as_str().expect("session_id missing");
    assert_eq!(body["results"]["brakes"][0], "https://shop.example/p/1");

    // The stored payload stays retrievable under the returned session id.
    let response = app
        .oneshot(get(&format!("/v1/sessions/{}", session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["brakes"][1], "https://shop.example/p/2");
}

#[tokio::test]
async fn test_upstream_failure_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = app(&format!("{}/webhook", server.uri()), None);

    let response = app
        .oneshot(json_post("/v1/parts-search", valid_request()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json(response).await;
    assert_eq!(body["error"], "No part information found");
}

#[tokio::test]
async fn test_non_json_upstream_body_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let app = app(&format!("{}/webhook", server.uri()), None);

    let response = app
        .oneshot(json_post("/v1/parts-search", valid_request()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_rate_limit_throttles_after_quota() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"brakes": []})))
        .mount(&server)
        .await;

    let app = app(&format!("{}/webhook", server.uri()), Some(new_ip_limiter(2)));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(json_post("/v1/parts-search", valid_request()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    let response = app
        .clone()
        .oneshot(json_post("/v1/parts-search", valid_request()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different forwarded client address keeps its own budget.
    let mut request = json_post("/v1/parts-search", valid_request());
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.50".parse().unwrap());
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn test_health_and_version_endpoints() {
    let app = app("http://127.0.0.1:9/webhook", None);

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/v1/version")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
