// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};

/// 抓取目标站点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrapeSite {
    /// autoparts-24.com
    Autoparts24,
    /// 2407.pl
    Marketplace2407,
}

impl Default for ScrapeSite {
    fn default() -> Self {
        ScrapeSite::Autoparts24
    }
}

/// 抓取请求数据传输对象
#[derive(Debug, Deserialize, Serialize)]
pub struct ScrapeRequestDto {
    /// 部件名
    #[serde(default)]
    pub part_name: String,
    /// 品牌（autoparts-24必填）
    pub brand: Option<String>,
    /// 车型
    pub model: Option<String>,
    /// 生产年份
    pub year: Option<i32>,
    /// 最大抓取页数
    pub max_pages: Option<u32>,
    /// 目标站点
    #[serde(default)]
    pub site: ScrapeSite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_defaults_to_autoparts24() {
        let dto: ScrapeRequestDto =
            serde_json::from_str(r#"{"part_name": "brake disc", "brand": "BMW"}"#).unwrap();
        assert_eq!(dto.site, ScrapeSite::Autoparts24);
    }

    #[test]
    fn test_site_kebab_case_names() {
        let dto: ScrapeRequestDto =
            serde_json::from_str(r#"{"part_name": "filtr", "site": "marketplace2407"}"#).unwrap();
        assert_eq!(dto.site, ScrapeSite::Marketplace2407);
    }
}
