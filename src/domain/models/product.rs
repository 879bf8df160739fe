// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 商品价格
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// 金额，站点未标注时为空
    pub amount: Option<f64>,
    /// 货币代码
    pub currency: String,
}

impl Default for Price {
    fn default() -> Self {
        Self {
            amount: None,
            currency: "EUR".to_string(),
        }
    }
}

/// 商品记录
///
/// 每次抓取临时产生，序列化后返回给调用方，抓取器内部不做持久化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// 商品标题
    pub title: String,
    /// 商品详情页URL
    pub url: Option<String>,
    /// 商品图片URL
    pub image_url: Option<String>,
    /// 价格
    pub price: Price,
    /// 配送时间描述（自由文本）
    pub delivery_time: Option<String>,
    /// 规格键值对
    pub specs: HashMap<String, String>,
}
