// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::models::product::ProductRecord;
use crate::scraper::page::{CdpPage, PageError, SitePage};
use crate::scraper::{autocomplete, parse, resolve, Outcome};

const NEXT_PAGE_SELECTOR: &str = "a.pagination__next, a[rel='next']";
const PAGE_IDLE_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// 抓取请求参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeParams {
    /// 部件名
    pub part_name: String,
    /// 用户输入的品牌
    pub brand: String,
    /// 用户输入的车型（可选）
    pub model: Option<String>,
    /// 生产年份（可选，用于详细列表过滤）
    pub year: Option<i32>,
    /// 最大抓取页数
    pub max_pages: u32,
}

/// 抓取结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    /// 匹配到的品牌（未匹配时回显用户输入）
    pub brand: String,
    /// 用户输入的车型
    pub model: Option<String>,
    /// 用户输入的年份
    pub year: Option<i32>,
    /// 部件名
    pub part_name: String,
    /// 商品总数
    pub total_products: usize,
    /// 商品列表
    pub products: Vec<ProductRecord>,
    /// 错误描述（部分失败时仍可能携带商品）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScrapeOutcome {
    fn failed(params: &ScrapeParams, brand: String, error: &str) -> Self {
        Self {
            brand,
            model: params.model.clone(),
            year: params.year,
            part_name: params.part_name.clone(),
            total_products: 0,
            products: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

/// autoparts-24抓取流水线
///
/// 品牌解析、两阶段车型解析、自动补全搜索、分页商品提取。
/// 每个阶段的失败都局限在该阶段内，流水线降级继续或优雅终止
pub struct Autoparts24Scraper {
    base: Url,
}

impl Autoparts24Scraper {
    /// 创建新的抓取器实例
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base_url).context("invalid autoparts-24 base url")?;
        Ok(Self { base })
    }

    /// 在给定页面上执行抓取流水线
    ///
    /// 所有失败模式都收敛为结果对象上的error字段，不上抛
    pub async fn run(&self, page: &dyn SitePage, params: &ScrapeParams) -> ScrapeOutcome {
        match self.run_inner(page, params).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Scrape aborted by browser failure: {}", e);
                ScrapeOutcome::failed(params, params.brand.clone(), &e.to_string())
            }
        }
    }

    async fn run_inner(
        &self,
        page: &dyn SitePage,
        params: &ScrapeParams,
    ) -> Result<ScrapeOutcome, PageError> {
        page.goto(self.base.as_str()).await?;

        let matched_brand = match resolve::resolve_brand(page, &params.brand).await? {
            Outcome::Found(name) => name,
            Outcome::NotFound | Outcome::TimedOut => {
                info!("No brand found, skipping");
                return Ok(ScrapeOutcome::failed(
                    params,
                    params.brand.clone(),
                    "Brand not found",
                ));
            }
        };

        if let Some(model) = &params.model {
            info!("Looking for model: {}", model);
            match resolve::resolve_model(page, &matched_brand, model, params.year, &self.base)
                .await?
            {
                Outcome::Found(name) => info!("Selected model: {}", name),
                Outcome::NotFound | Outcome::TimedOut => {
                    // Degrade to the generic brand listing.
                    warn!("Could not select model '{}'", model);
                }
            }
        } else {
            info!("No model specified, skipping model selection");
        }

        match autocomplete::search_part(page, &params.part_name).await? {
            Outcome::Found(()) => {}
            Outcome::NotFound | Outcome::TimedOut => {
                return Ok(ScrapeOutcome::failed(
                    params,
                    matched_brand,
                    "Search failed",
                ));
            }
        }

        let products = collect_products(page, &self.base, params.max_pages).await?;
        info!("Successfully extracted {} products", products.len());

        Ok(ScrapeOutcome {
            brand: matched_brand,
            model: params.model.clone(),
            year: params.year,
            part_name: params.part_name.clone(),
            total_products: products.len(),
            products,
            error: None,
        })
    }

    /// 打开一个新浏览器页面执行抓取
    ///
    /// 页面在成功、部分失败和异常路径上都会被关闭
    pub async fn scrape(&self, params: &ScrapeParams) -> anyhow::Result<ScrapeOutcome> {
        let page = CdpPage::open()
            .await
            .context("failed to open browser page")?;
        let outcome = self.run(&page, params).await;
        if let Err(e) = page.close().await {
            warn!("Failed to close browser page: {}", e);
        }
        Ok(outcome)
    }
}

/// 分页提取商品
///
/// 最多抓取max_pages页；找不到"下一页"控件或翻页导航超时都视为
/// 没有更多页面，而不是错误
async fn collect_products(
    page: &dyn SitePage,
    base: &Url,
    max_pages: u32,
) -> Result<Vec<ProductRecord>, PageError> {
    let mut all_products = Vec::new();
    let mut current_page = 1u32;

    loop {
        info!("Extracting products from page {}", current_page);
        let html = page.content().await?;
        all_products.extend(parse::parse_products(&html, base));

        if current_page >= max_pages {
            break;
        }
        if !parse::has_next_page(&html) {
            info!("No more pages found");
            break;
        }

        info!("Navigating to page {}", current_page + 1);
        if let Err(e) = page.click(NEXT_PAGE_SELECTOR).await {
            debug!("Next page control not clickable: {}", e);
            break;
        }
        match page.wait_for_network_idle(PAGE_IDLE_TIMEOUT).await {
            Ok(()) => {}
            Err(PageError::Timeout(_)) => {
                debug!("Page transition timed out, treating as last page");
                break;
            }
            Err(e) => return Err(e),
        }
        tokio::time::sleep(PAGE_SETTLE_DELAY).await;
        current_page += 1;
    }

    Ok(all_products)
}
