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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含数据库、服务器、Webhook、缓存、抓取和速率限制等所有配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 数据库配置
    pub database: DatabaseSettings,
    /// 服务器配置
    pub server: ServerSettings,
    /// 上游Webhook配置
    pub webhook: WebhookSettings,
    /// 会话缓存配置
    pub cache: CacheSettings,
    /// 抓取配置
    pub scraper: ScraperSettings,
    /// 速率限制配置
    pub rate_limiting: RateLimitingSettings,
}

/// 数据库配置设置
#[derive(Debug, Deserialize)]
pub struct DatabaseSettings {
    /// 数据库连接URL
    pub url: String,
    /// 最大连接数
    pub max_connections: Option<u32>,
    /// 最小连接数
    pub min_connections: Option<u32>,
    /// 连接超时时间（秒）
    pub connect_timeout: Option<u64>,
    /// 空闲连接超时时间（秒）
    pub idle_timeout: Option<u64>,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 上游Webhook配置设置
#[derive(Debug, Deserialize)]
pub struct WebhookSettings {
    /// 工作流Webhook地址
    pub url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// 会话缓存配置设置
#[derive(Debug, Deserialize)]
pub struct CacheSettings {
    /// 会话生存时间（分钟）
    pub session_ttl_minutes: u64,
}

/// 抓取配置设置
#[derive(Debug, Deserialize)]
pub struct ScraperSettings {
    /// autoparts-24站点基础URL
    pub autoparts24_base_url: String,
    /// 2407.pl站点基础URL
    pub marketplace2407_base_url: String,
    /// 单次请求允许抓取的最大页数
    pub max_pages_cap: u32,
}

/// 速率限制配置设置
#[derive(Debug, Deserialize)]
pub struct RateLimitingSettings {
    /// 是否启用速率限制
    pub enabled: bool,
    /// 配件搜索接口每分钟每IP请求数限制
    pub parts_search_rpm: u32,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从环境变量加载配置，支持默认值
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default DB settings
            .set_default("database.url", "sqlite://partscout.db?mode=rwc")?
            .set_default("database.max_connections", 20)?
            .set_default("database.min_connections", 2)?
            .set_default("database.connect_timeout", 10)?
            .set_default("database.idle_timeout", 300)?
            // Default upstream webhook settings
            .set_default("webhook.url", "http://localhost:5678/webhook/parts-search")?
            .set_default("webhook.timeout_secs", 30)?
            // Default session cache settings
            .set_default("cache.session_ttl_minutes", 30)?
            // Default scraper settings
            .set_default("scraper.autoparts24_base_url", "https://autoparts-24.com")?
            .set_default("scraper.marketplace2407_base_url", "https://2407.pl")?
            .set_default("scraper.max_pages_cap", 5)?
            // Default rate limiting settings
            .set_default("rate_limiting.enabled", true)?
            .set_default("rate_limiting.parts_search_rpm", 5)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PARTSCOUT").separator("__"));

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::new().expect("defaults should deserialize");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.cache.session_ttl_minutes, 30);
        assert_eq!(settings.rate_limiting.parts_search_rpm, 5);
        assert_eq!(settings.webhook.timeout_secs, 30);
    }
}
