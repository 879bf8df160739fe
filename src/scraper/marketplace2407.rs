// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::models::product::ProductRecord;
use crate::scraper::page::{CdpPage, PageError, SitePage};

const COOKIE_CONSENT_TEXT: &str = "Ok, zgadzam się";
const SEARCH_BUTTON_SELECTOR: &str = "button[aria-label='search']";
const SEARCH_INPUT_SELECTOR: &str = "input[aria-label='multiSearch']";
const DROPDOWN_SELECTOR: &str = "div.MultiSearchResultsstyle__MultiSearchResultsWrapper-sc-obi7cd-0";
const FIRST_RESULT_SELECTOR: &str =
    "div.MultiSearchResultsstyle__MultiSearchResultsWrapper-sc-obi7cd-0 a";
const CATALOGUE_SELECTOR: &str = "div.Liststyle__CatalogueList-sc-8cmrw6-0";

const DROPDOWN_TIMEOUT: Duration = Duration::from_secs(5);
const CATALOGUE_TIMEOUT: Duration = Duration::from_secs(10);
const NAV_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// 2407.pl抓取流水线
///
/// 查询驱动：打开站点、关闭cookie弹窗、输入查询、
/// 点击第一条联想结果，然后从目录页提取商品
pub struct Marketplace2407Scraper {
    base: Url,
    max_products: usize,
}

impl Marketplace2407Scraper {
    /// 创建新的抓取器实例
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url).context("invalid 2407.pl base url")?;
        Ok(Self {
            base,
            max_products: 10,
        })
    }

    /// 在给定页面上执行抓取
    pub async fn run(
        &self,
        page: &dyn SitePage,
        query: &str,
    ) -> Result<Vec<ProductRecord>, PageError> {
        page.goto(self.base.as_str()).await?;

        // The consent dialog only shows up on fresh sessions.
        if page.click_by_text(COOKIE_CONSENT_TEXT).await.is_ok() {
            debug!("Dismissed cookie consent dialog");
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        page.click(SEARCH_BUTTON_SELECTOR).await?;
        page.clear_value(SEARCH_INPUT_SELECTOR).await?;
        page.type_text(SEARCH_INPUT_SELECTOR, query).await?;

        if let Err(PageError::Timeout(_)) =
            page.wait_for_selector(DROPDOWN_SELECTOR, DROPDOWN_TIMEOUT).await
        {
            warn!("No search suggestions appeared for '{}'", query);
            return Ok(Vec::new());
        }
        tokio::time::sleep(Duration::from_millis(500)).await;

        page.click(FIRST_RESULT_SELECTOR).await?;
        if let Err(e) = page.wait_for_network_idle(NAV_IDLE_TIMEOUT).await {
            debug!("Navigation idle wait ended early: {}", e);
        }

        if let Err(PageError::Timeout(_)) = page
            .wait_for_selector(CATALOGUE_SELECTOR, CATALOGUE_TIMEOUT)
            .await
        {
            warn!("Catalogue never appeared for '{}'", query);
            return Ok(Vec::new());
        }

        let html = page.content().await?;
        let products = crate::scraper::parse::parse_2407_products(&html, &self.base, self.max_products);
        info!("Found {} products on 2407.pl", products.len());
        Ok(products)
    }

    /// 打开一个新浏览器页面执行抓取
    ///
    /// 页面在所有退出路径上都会被关闭
    pub async fn scrape(&self, query: &str) -> anyhow::Result<Vec<ProductRecord>> {
        let page = CdpPage::open()
            .await
            .context("failed to open browser page")?;
        let result = self.run(&page, query).await;
        if let Err(e) = page.close().await {
            warn!("Failed to close browser page: {}", e);
        }
        result.map_err(Into::into)
    }
}
