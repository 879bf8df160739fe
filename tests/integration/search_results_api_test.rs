// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use axum::{Extension, Router};
use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use tower::ServiceExt;

use partscout::domain::repositories::search_result_repository::SearchResultRepository;
use partscout::infrastructure::database::entities::search_result;
use partscout::infrastructure::repositories::SearchResultRepositoryImpl;
use partscout::presentation::routes;

use super::helpers::{get, read_json, test_db};

async fn insert_row(
    db: &DatabaseConnection,
    search_result_id: i64,
    website_search_id: i64,
    title: &str,
    price: f64,
    age_minutes: i64,
) {
    let created_at = (Utc::now() - Duration::minutes(age_minutes)).fixed_offset();
    search_result::ActiveModel {
        search_result_id: Set(search_result_id),
        website_search_id: Set(website_search_id),
        url: Set(format!("https://shop.example/{search_result_id}/{website_search_id}")),
        title: Set(title.to_string()),
        price: Set(price),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("insert failed");
}

async fn seeded_db() -> Arc<DatabaseConnection> {
    let db = test_db().await;
    // Older search with two rows, inserted out of order.
    insert_row(&db, 101, 2, "Brake pad set rear", 39.9, 120).await;
    insert_row(&db, 101, 1, "Brake pad set front", 49.9, 110).await;
    // Newer search with one row.
    insert_row(&db, 202, 1, "Oil filter", 12.5, 5).await;
    db
}

#[tokio::test]
async fn test_groups_ordered_by_latest_activity() {
    let db = seeded_db().await;
    let repo = SearchResultRepositoryImpl::new(db);

    let groups = repo.list_groups().await.unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].search_result_id, 202);
    assert_eq!(groups[0].count, 1);
    assert_eq!(groups[1].search_result_id, 101);
    assert_eq!(groups[1].count, 2);
}

#[tokio::test]
async fn test_group_detail_ordered_by_website_search_id() {
    let db = seeded_db().await;
    let repo = SearchResultRepositoryImpl::new(db);

    let results = repo.find_by_search_id(101).await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].website_search_id, 1);
    assert_eq!(results[0].title, "Brake pad set front");
    assert_eq!(results[1].website_search_id, 2);
}

#[tokio::test]
async fn test_unknown_group_yields_empty_rows() {
    let db = seeded_db().await;
    let repo = SearchResultRepositoryImpl::new(db);

    let results = repo.find_by_search_id(999).await.unwrap();
    assert!(results.is_empty());
}

fn app(repo: Arc<SearchResultRepositoryImpl>) -> Router {
    routes::routes(None).layer(Extension(repo))
}

#[tokio::test]
async fn test_list_endpoint_returns_groups() {
    let db = seeded_db().await;
    let app = app(Arc::new(SearchResultRepositoryImpl::new(db)));

    let response = app.oneshot(get("/v1/search-results")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let groups = body.as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["search_result_id"], 202);
    assert_eq!(groups[1]["count"], 2);
}

#[tokio::test]
async fn test_detail_endpoint_formats_price_with_three_decimals() {
    let db = seeded_db().await;
    let app = app(Arc::new(SearchResultRepositoryImpl::new(db)));

    let response = app.oneshot(get("/v1/search-results/101")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["price"], "49.900");
    assert_eq!(rows[0]["website_search_id"], 1);
    assert!(rows[0]["url"].as_str().unwrap().starts_with("https://"));
}

#[tokio::test]
async fn test_detail_endpoint_unknown_group_is_empty_list() {
    let db = seeded_db().await;
    let app = app(Arc::new(SearchResultRepositoryImpl::new(db)));

    let response = app.oneshot(get("/v1/search-results/999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body, serde_json::json!([]));
}
