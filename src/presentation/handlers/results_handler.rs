// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Path, Extension, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::repositories::search_result_repository::SearchResultRepository;
use crate::presentation::errors::AppError;

/// 搜索结果分组列表端点
///
/// 按search_result_id聚合，最新的分组排在最前
pub async fn list_groups<R>(Extension(repo): Extension<Arc<R>>) -> Result<Json<Value>, AppError>
where
    R: SearchResultRepository + 'static,
{
    let groups = repo.list_groups().await?;

    let body: Vec<Value> = groups
        .iter()
        .map(|g| {
            json!({
                "search_result_id": g.search_result_id,
                "count": g.count,
                "latest_created_at": g.latest_created_at,
            })
        })
        .collect();

    Ok(Json(json!(body)))
}

/// 搜索结果分组明细端点
///
/// 返回分组内全部行，按website_search_id升序；
/// 价格在序列化边界固定为三位小数的字符串
pub async fn get_group<R>(
    Extension(repo): Extension<Arc<R>>,
    Path(search_result_id): Path<i64>,
) -> Result<Json<Value>, AppError>
where
    R: SearchResultRepository + 'static,
{
    let results = repo.find_by_search_id(search_result_id).await?;

    let body: Vec<Value> = results
        .iter()
        .map(|r| {
            json!({
                "website_search_id": r.website_search_id,
                "title": r.title,
                "price": format!("{:.3}", r.price),
                "url": r.url,
            })
        })
        .collect();

    Ok(Json(json!(body)))
}
