// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::models::candidate::{ModelCandidate, SiteRef};
use crate::scraper::matching::{
    normalize_model_name, parse_year_range, slugify, soft_match, year_in_range,
};
use crate::scraper::page::{PageError, SitePage};
use crate::scraper::{parse, Outcome};

const BRAND_GRID_TIMEOUT: Duration = Duration::from_secs(10);
const SHOW_MORE_IDLE_TIMEOUT: Duration = Duration::from_secs(20);
const NAV_IDLE_TIMEOUT: Duration = Duration::from_secs(10);
const SETTLE_DELAY: Duration = Duration::from_secs(1);

const BRAND_MATCH_THRESHOLD: f64 = 0.6;
const MODEL_MATCH_THRESHOLD: f64 = 0.6;

/// 等待导航后的页面稳定
///
/// 网络空闲超时只降级，不上抛
async fn settle(page: &dyn SitePage, timeout: Duration) {
    tokio::time::sleep(SETTLE_DELAY).await;
    if let Err(e) = page.wait_for_network_idle(timeout).await {
        debug!("Network idle wait ended early: {}", e);
    }
}

/// 品牌解析器
///
/// 对站点品牌列表做模糊匹配并点击进入品牌页。
/// 站点拼写和大小写可能与用户输入不同，精确匹配过脆，
/// 但阈值防止把"Audi"匹配到"Aston"这类误判
pub async fn resolve_brand(
    page: &dyn SitePage,
    user_brand: &str,
) -> Result<Outcome<String>, PageError> {
    if let Err(PageError::Timeout(sel)) = page
        .wait_for_selector("a.SUBCATEGORY_ITEM", BRAND_GRID_TIMEOUT)
        .await
    {
        warn!("Brand grid never appeared ({})", sel);
        return Ok(Outcome::TimedOut);
    }

    // Expand the full manufacturer grid before collecting names.
    if let Err(e) = page.click_by_text("Show more manufacturers").await {
        debug!("Show more manufacturers not clickable: {}", e);
    }
    if let Err(e) = page.wait_for_network_idle(SHOW_MORE_IDLE_TIMEOUT).await {
        debug!("Manufacturer grid idle wait ended early: {}", e);
    }
    tokio::time::sleep(SETTLE_DELAY).await;

    let html = page.content().await?;
    let brands = parse::parse_brand_names(&html);
    info!("Found {} brands", brands.len());

    let lowered: Vec<String> = brands.iter().map(|b| b.to_lowercase()).collect();
    let matched = match soft_match(&user_brand.to_lowercase(), &lowered, BRAND_MATCH_THRESHOLD) {
        Some(idx) => brands[idx].clone(),
        None => return Ok(Outcome::NotFound),
    };
    info!("Matched brand: {}", matched);

    let selector = format!("a[href*='/{}/']", slugify(&matched));
    if let Err(e) = page.click(&selector).await {
        warn!("Failed to open brand page for '{}': {}", matched, e);
        return Ok(Outcome::NotFound);
    }
    settle(page, NAV_IDLE_TIMEOUT).await;

    Ok(Outcome::Found(matched))
}

/// 激活车型候选项
///
/// 直接链接点击失败或混淆条目点击失败时，回退为解码后导航；
/// 点击失败是可恢复的，不是致命错误
async fn activate_model(
    page: &dyn SitePage,
    candidate: &ModelCandidate,
    base: &Url,
) -> Result<bool, PageError> {
    let selector = match &candidate.target {
        SiteRef::Direct(href) => format!("a[href='{}']", href),
        SiteRef::Encoded(payload) => format!("span[data-field='{}']", payload),
    };

    if page.click(&selector).await.is_ok() {
        return Ok(true);
    }
    debug!(
        "Clicking model '{}' failed, falling back to decode-and-navigate",
        candidate.name
    );

    match candidate.target.resolve(base) {
        Some(url) => {
            page.goto(&url).await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// 车型解析器
///
/// 两阶段状态机：先模糊匹配简单列表；未命中且提供了年份时，
/// 展开"show all"列表按年份区间过滤后做双向子串匹配。
/// 两阶段都失败只报告未选中，流水线降级为通用列表，不中止
pub async fn resolve_model(
    page: &dyn SitePage,
    brand: &str,
    model_input: &str,
    year: Option<i32>,
    base: &Url,
) -> Result<Outcome<String>, PageError> {
    let normalized_input = normalize_model_name(model_input, Some(brand));

    // Phase 1: fuzzy match against the simple list.
    let html = page.content().await?;
    let simple_models = parse::parse_simple_models(&html);
    info!("Found {} models in simple list", simple_models.len());

    let normalized_names: Vec<String> = simple_models
        .iter()
        .map(|m| normalize_model_name(&m.name, Some(brand)))
        .collect();

    if let Some(idx) = soft_match(&normalized_input, &normalized_names, MODEL_MATCH_THRESHOLD) {
        let candidate = &simple_models[idx];
        info!("Found match in simple list: {}", candidate.name);
        if activate_model(page, candidate, base).await? {
            settle(page, NAV_IDLE_TIMEOUT).await;
            return Ok(Outcome::Found(candidate.name.clone()));
        }
    }

    // Phase 2: year-filtered detailed list, only when a year was supplied.
    let year = match year {
        Some(y) => y,
        None => return Ok(Outcome::NotFound),
    };
    info!("Model not selected yet, trying detailed list with year {}", year);

    if let Err(e) = page.click_by_text("show all").await {
        warn!("Show-all control not found: {}", e);
        return Ok(Outcome::NotFound);
    }
    settle(page, NAV_IDLE_TIMEOUT).await;

    let html = page.content().await?;
    let detailed_models = parse::parse_detailed_models(&html);
    info!("Found {} models in detailed list", detailed_models.len());

    for candidate in &detailed_models {
        let (start, end) = candidate
            .year_text
            .as_deref()
            .map(parse_year_range)
            .unwrap_or((None, None));
        if !year_in_range(Some(year), start, end) {
            continue;
        }

        // Loose containment in either direction, by design.
        let normalized_detailed = normalize_model_name(&candidate.name, Some(brand));
        if !normalized_input.contains(&normalized_detailed)
            && !normalized_detailed.contains(&normalized_input)
        {
            continue;
        }

        info!(
            "Found match with year: {} ({})",
            candidate.name,
            candidate.year_text.as_deref().unwrap_or("")
        );
        if activate_model(page, candidate, base).await? {
            settle(page, NAV_IDLE_TIMEOUT).await;
            return Ok(Outcome::Found(candidate.name.clone()));
        }
    }

    Ok(Outcome::NotFound)
}
