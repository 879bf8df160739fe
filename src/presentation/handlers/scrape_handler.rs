// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::anyhow;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::dto::scrape_request::{ScrapeRequestDto, ScrapeSite};
use crate::config::settings::Settings;
use crate::infrastructure::cache::SessionCache;
use crate::presentation::errors::AppError;
use crate::scraper::autoparts24::{Autoparts24Scraper, ScrapeParams};
use crate::scraper::marketplace2407::Marketplace2407Scraper;

/// 抓取端点
///
/// 同步执行抓取并把结果存入会话缓存，之后可按会话ID重新读取
pub async fn create_scrape(
    Extension(settings): Extension<Arc<Settings>>,
    Extension(cache): Extension<Arc<SessionCache>>,
    Json(request): Json<ScrapeRequestDto>,
) -> Result<Response, AppError> {
    if request.part_name.trim().is_empty() {
        return Err(anyhow!("part_name is required").into());
    }

    let payload = match request.site {
        ScrapeSite::Autoparts24 => {
            let brand = request
                .brand
                .as_deref()
                .map(str::trim)
                .filter(|b| !b.is_empty())
                .ok_or_else(|| anyhow!("brand is required for autoparts24"))?;

            let cap = settings.scraper.max_pages_cap;
            let params = ScrapeParams {
                part_name: request.part_name.trim().to_string(),
                brand: brand.to_string(),
                model: request.model.clone(),
                year: request.year,
                max_pages: request.max_pages.unwrap_or(1).clamp(1, cap),
            };

            let scraper = Autoparts24Scraper::new(&settings.scraper.autoparts24_base_url)?;
            let outcome = scraper.scrape(&params).await?;
            json!(outcome)
        }
        ScrapeSite::Marketplace2407 => {
            let scraper =
                Marketplace2407Scraper::new(&settings.scraper.marketplace2407_base_url)?;
            let products = scraper.scrape(request.part_name.trim()).await?;
            json!({
                "query": request.part_name.trim(),
                "total_products": products.len(),
                "products": products,
            })
        }
    };

    let session_id = cache.store(payload.clone());
    info!("Scrape stored under session {}", session_id);

    let mut body = json!({ "session_id": session_id });
    if let (Some(obj), Some(extra)) = (body.as_object_mut(), payload.as_object()) {
        for (k, v) in extra {
            obj.insert(k.clone(), v.clone());
        }
    }

    Ok((StatusCode::OK, Json(body)).into_response())
}
