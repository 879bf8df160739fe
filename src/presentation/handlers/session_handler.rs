// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::infrastructure::cache::SessionCache;
use crate::presentation::errors::AppError;

/// 会话查询端点
///
/// 过期会话与不存在的会话返回同样的404
pub async fn get_session(
    Extension(cache): Extension<Arc<SessionCache>>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    match cache.get(&session_id) {
        Some(payload) => Ok((StatusCode::OK, Json(payload)).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Session not found or expired" })),
        )
            .into_response()),
    }
}
