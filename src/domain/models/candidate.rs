// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

/// 站点引用
///
/// 目标站点上可导航的引用，直接链接或经过base64混淆的载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SiteRef {
    /// 直接href链接
    Direct(String),
    /// base64编码的混淆载荷，导航前需解码
    Encoded(String),
}

impl SiteRef {
    /// 将引用解析为绝对URL
    ///
    /// 解码失败记录日志并返回None，调用方跳过该条目继续处理
    pub fn resolve(&self, base: &Url) -> Option<String> {
        match self {
            SiteRef::Direct(href) => match base.join(href) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    warn!("Failed to join href '{}' against base: {}", href, e);
                    None
                }
            },
            SiteRef::Encoded(payload) => {
                let bytes = match BASE64.decode(payload.as_bytes()) {
                    Ok(b) => b,
                    Err(e) => {
                        warn!("Failed to decode obfuscated reference: {}", e);
                        return None;
                    }
                };
                match String::from_utf8(bytes) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warn!("Obfuscated reference is not valid UTF-8: {}", e);
                        None
                    }
                }
            }
        }
    }
}

/// 车型候选项
#[derive(Debug, Clone)]
pub struct ModelCandidate {
    /// 站点上显示的车型名
    pub name: String,
    /// 年份区间原始文本（仅详细列表提供）
    pub year_text: Option<String>,
    /// 导航目标
    pub target: SiteRef,
}
