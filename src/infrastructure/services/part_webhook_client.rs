// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// 上游Webhook查询参数
#[derive(Debug, Clone, Serialize)]
pub struct PartInfoRequest {
    /// 车牌号
    pub license_plate: String,
    /// 部件名
    pub part_name: String,
    /// 车辆类型
    pub car_type: String,
    /// 车型类别
    pub car_model_type: String,
    /// 车型
    pub car_model: String,
}

/// 配件信息Webhook客户端
///
/// 本服务是上游工作流的薄代理：转发查询参数，把响应
/// 归一化为分类到URL列表的映射。上游不可用或返回非JSON
/// 都归一化为None，由表示层映射为网关错误
pub struct PartWebhookClient {
    /// HTTP 客户端
    client: reqwest::Client,
    /// 上游Webhook地址
    webhook_url: String,
}

impl PartWebhookClient {
    /// 创建新的Webhook客户端
    pub fn new(webhook_url: String, timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            webhook_url,
        }
    }

    /// 查询配件信息
    ///
    /// # 返回值
    ///
    /// * `Some(map)` - 归一化后的分类到URL列表映射
    /// * `None` - 上游不可达、响应非成功或响应体不是JSON
    pub async fn get_part_info(
        &self,
        request: &PartInfoRequest,
    ) -> Option<HashMap<String, Vec<String>>> {
        let response = match self
            .client
            .post(&self.webhook_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!("Upstream webhook unreachable: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Upstream webhook returned status {}", response.status());
            return None;
        }

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("Upstream webhook returned non-JSON body: {}", e);
                return None;
            }
        };

        debug!("Upstream webhook payload: {}", body);
        Some(normalize_part_info(&body))
    }
}

/// 归一化上游负载
///
/// 接受两种形状：对象 {category: [urls]}，或包着单个对象的数组。
/// 字符串值包装为单元素列表，非字符串值跳过
fn normalize_part_info(body: &Value) -> HashMap<String, Vec<String>> {
    let object = match body {
        Value::Object(map) => Some(map),
        Value::Array(items) => items.first().and_then(Value::as_object),
        _ => None,
    };

    let mut normalized = HashMap::new();
    let Some(object) = object else {
        return normalized;
    };

    for (category, value) in object {
        let urls: Vec<String> = match value {
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => continue,
        };
        normalized.insert(category.clone(), urls);
    }
    normalized
}
