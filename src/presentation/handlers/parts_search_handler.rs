// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::dto::parts_search_request::PartsSearchRequestDto;
use crate::infrastructure::cache::SessionCache;
use crate::infrastructure::services::{PartInfoRequest, PartWebhookClient};
use crate::presentation::errors::AppError;

const VALIDATION_MESSAGE: &str =
    "Plate, part name, car type, car model type and car model are required";

/// 配件搜索代理端点
///
/// 校验五个必填字段后转发给上游Webhook工作流。
/// 上游结果存入会话缓存并返回会话ID；上游不可用映射为网关错误
pub async fn search_parts(
    Extension(webhook): Extension<Arc<PartWebhookClient>>,
    Extension(cache): Extension<Arc<SessionCache>>,
    Json(request): Json<PartsSearchRequestDto>,
) -> Result<Response, AppError> {
    if !request.is_complete() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": VALIDATION_MESSAGE })),
        )
            .into_response());
    }

    info!(
        "Parts search request: plate={}, part={}",
        request.license_plate, request.part_name
    );

    let upstream_request = PartInfoRequest {
        license_plate: request.license_plate.clone(),
        part_name: request.part_name.clone(),
        car_type: request.car_type.clone(),
        car_model_type: request.car_model_type.clone(),
        car_model: request.car_model.clone(),
    };

    let Some(part_info) = webhook.get_part_info(&upstream_request).await else {
        return Ok((
            StatusCode::BAD_GATEWAY,
            Json(json!({ "error": "No part information found" })),
        )
            .into_response());
    };

    let session_id = cache.store(json!(part_info));
    info!("Parts search stored under session {}", session_id);

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "message": "Search accepted",
            "session_id": session_id,
            "results": part_info,
        })),
    )
        .into_response())
}
