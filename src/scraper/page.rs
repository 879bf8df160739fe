// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;

// Global browser instance to avoid re-launching Chrome on every request.
// Pages are still per-invocation; only the browser process is shared.
static BROWSER_INSTANCE: OnceCell<Browser> = OnceCell::const_new();

/// 页面错误类型
#[derive(Error, Debug)]
pub enum PageError {
    /// 等待超时
    #[error("timed out waiting for: {0}")]
    Timeout(String),
    /// 元素不存在
    #[error("element not found: {0}")]
    NotFound(String),
    /// 浏览器错误
    #[error("browser error: {0}")]
    Browser(String),
}

/// 站点页面特质
///
/// 抓取流水线只依赖这组DOM操作，生产环境由chromiumoxide承载，
/// 测试环境用脚本化的mock页面承载
#[async_trait]
pub trait SitePage: Send + Sync {
    /// 导航到指定URL
    async fn goto(&self, url: &str) -> Result<(), PageError>;

    /// 获取当前页面HTML
    async fn content(&self) -> Result<String, PageError>;

    /// 点击第一个匹配选择器的元素
    async fn click(&self, selector: &str) -> Result<(), PageError>;

    /// 点击文本内容包含指定字符串的第一个元素
    async fn click_by_text(&self, text: &str) -> Result<(), PageError>;

    /// 清空输入框的值
    async fn clear_value(&self, selector: &str) -> Result<(), PageError>;

    /// 向输入框追加键盘输入
    async fn type_text(&self, selector: &str, text: &str) -> Result<(), PageError>;

    /// 向元素发送按键
    async fn press_key(&self, selector: &str, key: &str) -> Result<(), PageError>;

    /// 轮询等待选择器出现
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), PageError>;

    /// 等待网络空闲（近似为等待导航完成）
    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), PageError>;

    /// 关闭页面
    async fn close(&self) -> Result<(), PageError>;
}

/// 获取或初始化共享浏览器实例
///
/// 浏览器进程只启动一次
pub async fn get_browser() -> Result<&'static Browser, PageError> {
    BROWSER_INSTANCE
        .get_or_try_init(|| async {
            let config = BrowserConfig::builder()
                .no_sandbox()
                .request_timeout(Duration::from_secs(30))
                .arg("--disable-gpu")
                .arg("--disable-dev-shm-usage")
                .build()
                .map_err(PageError::Browser)?;

            let (browser, mut handler) = Browser::launch(config)
                .await
                .map_err(|e| PageError::Browser(e.to_string()))?;

            // Spawn a handler to process browser events
            tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(browser)
        })
        .await
}

/// 基于chromiumoxide的页面实现
pub struct CdpPage {
    page: Page,
}

impl CdpPage {
    /// 在共享浏览器上打开一个新页面
    pub async fn open() -> Result<Self, PageError> {
        let browser = get_browser().await?;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| PageError::Browser(e.to_string()))?;
        Ok(Self { page })
    }
}

#[async_trait]
impl SitePage for CdpPage {
    async fn goto(&self, url: &str) -> Result<(), PageError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| PageError::Browser(e.to_string()))?;
        Ok(())
    }

    async fn content(&self) -> Result<String, PageError> {
        self.page
            .content()
            .await
            .map_err(|e| PageError::Browser(e.to_string()))
    }

    async fn click(&self, selector: &str) -> Result<(), PageError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| PageError::NotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| PageError::Browser(e.to_string()))?;
        Ok(())
    }

    async fn click_by_text(&self, text: &str) -> Result<(), PageError> {
        let needle = serde_json::to_string(&text.to_lowercase())
            .map_err(|e| PageError::Browser(e.to_string()))?;
        let script = format!(
            "(() => {{ \
               const needle = {needle}; \
               const els = Array.from(document.querySelectorAll('a, button, span, div')); \
               const el = els.find(e => e.textContent && e.textContent.trim().toLowerCase().includes(needle)); \
               if (el) {{ el.click(); return true; }} \
               return false; \
             }})()"
        );
        let clicked = self
            .page
            .evaluate(script)
            .await
            .map_err(|e| PageError::Browser(e.to_string()))?
            .into_value::<bool>()
            .unwrap_or(false);
        if clicked {
            Ok(())
        } else {
            Err(PageError::NotFound(format!("text: {}", text)))
        }
    }

    async fn clear_value(&self, selector: &str) -> Result<(), PageError> {
        let sel = serde_json::to_string(selector).map_err(|e| PageError::Browser(e.to_string()))?;
        let script = format!(
            "(() => {{ const el = document.querySelector({sel}); if (el) {{ el.value = ''; }} }})()"
        );
        self.page
            .evaluate(script)
            .await
            .map_err(|e| PageError::Browser(e.to_string()))?;
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), PageError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| PageError::NotFound(selector.to_string()))?;
        element
            .click()
            .await
            .map_err(|e| PageError::Browser(e.to_string()))?;
        element
            .type_str(text)
            .await
            .map_err(|e| PageError::Browser(e.to_string()))?;
        Ok(())
    }

    async fn press_key(&self, selector: &str, key: &str) -> Result<(), PageError> {
        let element = self
            .page
            .find_element(selector)
            .await
            .map_err(|_| PageError::NotFound(selector.to_string()))?;
        element
            .press_key(key)
            .await
            .map_err(|e| PageError::Browser(e.to_string()))?;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), PageError> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(PageError::Timeout(selector.to_string()));
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    }

    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<(), PageError> {
        match tokio::time::timeout(timeout, self.page.wait_for_navigation()).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(PageError::Browser(e.to_string())),
            Err(_) => Err(PageError::Timeout("navigation".to_string())),
        }
    }

    async fn close(&self) -> Result<(), PageError> {
        self.page
            .clone()
            .close()
            .await
            .map_err(|e| PageError::Browser(e.to_string()))
    }
}
