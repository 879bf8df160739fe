// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 搜索结果行
///
/// 由外部Webhook工作流写入，本服务只读查询，从不修改
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// 逻辑搜索分组ID
    pub search_result_id: i64,
    /// 单一来源站点的结果ID
    pub website_search_id: i64,
    /// 结果URL
    pub url: String,
    /// 结果标题
    pub title: String,
    /// 价格
    pub price: f64,
    /// 创建时间
    pub created_at: DateTime<Utc>,
}

/// 搜索结果分组聚合
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultGroup {
    /// 逻辑搜索分组ID
    pub search_result_id: i64,
    /// 该分组内的结果行数
    pub count: i64,
    /// 分组内最新一行的创建时间
    pub latest_created_at: DateTime<Utc>,
}
