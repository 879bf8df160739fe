// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::infrastructure::repositories::SearchResultRepositoryImpl;
use crate::presentation::handlers::{
    parts_search_handler, results_handler, scrape_handler, session_handler,
};
use crate::presentation::middleware::{self, IpRateLimiter};
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// 创建应用路由
///
/// # 参数
///
/// * `rate_limiter` - 配件搜索端点的IP速率限制器；None表示关闭限流
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(rate_limiter: Option<Arc<IpRateLimiter>>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let mut parts_search_routes =
        Router::new().route("/v1/parts-search", post(parts_search_handler::search_parts));
    if let Some(limiter) = rate_limiter {
        parts_search_routes =
            parts_search_routes.layer(from_fn_with_state(limiter, middleware::rate_limit));
    }

    let api_routes = Router::new()
        .route("/v1/sessions/{id}", get(session_handler::get_session))
        .route(
            "/v1/scrape/sessions/{id}",
            get(session_handler::get_session),
        )
        .route(
            "/v1/search-results",
            get(results_handler::list_groups::<SearchResultRepositoryImpl>),
        )
        .route(
            "/v1/search-results/{id}",
            get(results_handler::get_group::<SearchResultRepositoryImpl>),
        )
        .route("/v1/scrape", post(scrape_handler::create_scrape));

    Router::new()
        .merge(public_routes)
        .merge(parts_search_routes)
        .merge(api_routes)
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
