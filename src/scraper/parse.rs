// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use tracing::{debug, warn};
use url::Url;

use crate::domain::models::candidate::{ModelCandidate, SiteRef};
use crate::domain::models::product::{Price, ProductRecord};

static PRICE_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+(?:[.,]\d+)?").unwrap());

fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 从品牌网格页提取全部品牌名
pub fn parse_brand_names(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let brand_selector =
        Selector::parse("div.manufacturer-grid-item div.categorySearch__brandInfo b").unwrap();

    document
        .select(&brand_selector)
        .map(|el| element_text(&el))
        .filter(|name| !name.is_empty())
        .collect()
}

/// 从简单列表提取全部可用车型
///
/// 条目要么是直接链接，要么是混淆的span
pub fn parse_simple_models(html: &str) -> Vec<ModelCandidate> {
    let document = Html::parse_document(html);
    let headline_selector =
        Selector::parse("div.findingParts__modelGroups__model_headline").unwrap();
    let link_selector = Selector::parse("a.link").unwrap();
    let encoded_selector = Selector::parse("span.L_encoded").unwrap();

    let mut models = Vec::new();
    for headline in document.select(&headline_selector) {
        if let Some(link) = headline.select(&link_selector).next() {
            if let Some(href) = link.value().attr("href") {
                models.push(ModelCandidate {
                    name: element_text(&link),
                    year_text: None,
                    target: SiteRef::Direct(href.to_string()),
                });
                continue;
            }
        }
        if let Some(span) = headline.select(&encoded_selector).next() {
            if let Some(payload) = span.value().attr("data-field") {
                models.push(ModelCandidate {
                    name: element_text(&span),
                    year_text: None,
                    target: SiteRef::Encoded(payload.to_string()),
                });
            }
        }
    }
    models
}

/// 从展开的"show all"列表提取带年份区间的车型
pub fn parse_detailed_models(html: &str) -> Vec<ModelCandidate> {
    let document = Html::parse_document(html);
    let entry_selector = Selector::parse("div.findingParts__modelGroups__model").unwrap();
    let year_selector =
        Selector::parse("div.box--m-w50p-t-w25p-m-pr-xxsmall-t-pr-none").unwrap();
    let model_box_selector = Selector::parse("div.box--m-w50p-t-w75p").unwrap();
    let link_selector = Selector::parse("a").unwrap();
    let encoded_selector = Selector::parse("span.L_encoded, span.modelEncoded").unwrap();

    let mut models = Vec::new();
    for entry in document.select(&entry_selector) {
        let year_text = entry
            .select(&year_selector)
            .next()
            .map(|el| element_text(&el));

        let model_box = match entry.select(&model_box_selector).next() {
            Some(b) => b,
            None => continue,
        };

        if let Some(link) = model_box.select(&link_selector).next() {
            if let Some(href) = link.value().attr("href") {
                models.push(ModelCandidate {
                    name: element_text(&link),
                    year_text,
                    target: SiteRef::Direct(href.to_string()),
                });
                continue;
            }
        }
        if let Some(span) = model_box.select(&encoded_selector).next() {
            if let Some(payload) = span.value().attr("data-field") {
                models.push(ModelCandidate {
                    name: element_text(&span),
                    year_text,
                    target: SiteRef::Encoded(payload.to_string()),
                });
            }
        }
    }
    models
}

/// 提取当前可见的自动补全建议标签
///
/// 建议列表下拉隐藏时返回空
pub fn parse_suggestions(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let list_selector = Selector::parse("div.awesomplete > ul").unwrap();
    let item_selector = Selector::parse("li").unwrap();

    for list in document.select(&list_selector) {
        if list.value().attr("hidden").is_some() {
            continue;
        }
        let suggestions: Vec<String> = list
            .select(&item_selector)
            .map(|li| element_text(&li))
            .filter(|text| !text.is_empty())
            .collect();
        if !suggestions.is_empty() {
            return suggestions;
        }
    }
    Vec::new()
}

/// 提取单个商品条目
fn parse_product_entry(item: &ElementRef<'_>, base: &Url) -> Result<ProductRecord> {
    let title_selector = Selector::parse("div.productList__title a").unwrap();
    let encoded_selector = Selector::parse("span.itemEncoded").unwrap();
    let image_selector = Selector::parse("img.visual").unwrap();
    let price_selector = Selector::parse("span[id^='price-']").unwrap();
    let currency_selector =
        Selector::parse("span.productList__price span[itemprop='priceCurrency']").unwrap();
    let delivery_selector = Selector::parse("span.productList__delivery").unwrap();
    let delivery_days_selector = Selector::parse("span[id^='time-']").unwrap();
    let info_item_selector = Selector::parse("ul.productInfo li.productInfo__item").unwrap();

    let title_link = item
        .select(&title_selector)
        .next()
        .ok_or_else(|| anyhow!("product entry has no title"))?;
    let title = element_text(&title_link);
    if title.is_empty() {
        return Err(anyhow!("product entry has an empty title"));
    }

    // Prefer the direct anchor; fall back to the obfuscated span.
    let mut url = title_link
        .value()
        .attr("href")
        .and_then(|href| SiteRef::Direct(href.to_string()).resolve(base));
    if url.is_none() {
        url = item
            .select(&encoded_selector)
            .next()
            .and_then(|span| span.value().attr("data-field"))
            .and_then(|payload| SiteRef::Encoded(payload.to_string()).resolve(base));
    }

    let image_url = item
        .select(&image_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|src| src.to_string());

    // The numeric data-price attribute beats the displayed text.
    let price = match item.select(&price_selector).next() {
        Some(span) => {
            let amount = span
                .value()
                .attr("data-price")
                .and_then(|raw| raw.parse::<f64>().ok());
            let currency = item
                .select(&currency_selector)
                .next()
                .map(|el| element_text(&el))
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "EUR".to_string());
            Price { amount, currency }
        }
        None => Price::default(),
    };

    // Delivery info is keyed on the numeric time span; the wrapper text
    // is only trusted when that span is present.
    let delivery_time = item
        .select(&delivery_days_selector)
        .next()
        .map(|days| {
            item.select(&delivery_selector)
                .next()
                .map(|el| element_text(&el))
                .filter(|text| !text.is_empty())
                .unwrap_or_else(|| format!("{} workdays", element_text(&days)))
        })
        .filter(|text| !text.is_empty());

    let mut specs = HashMap::new();
    for info_item in item.select(&info_item_selector) {
        let text = element_text(&info_item);
        if let Some((key, value)) = text.split_once(':') {
            specs.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    Ok(ProductRecord {
        title,
        url,
        image_url,
        price,
        delivery_time,
        specs,
    })
}

/// 提取商品列表页的全部商品
///
/// 单个条目解析失败只记录日志并跳过，不影响其余条目
pub fn parse_products(html: &str, base: &Url) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let item_selector = Selector::parse("li.productList__item").unwrap();

    let mut products = Vec::new();
    for item in document.select(&item_selector) {
        match parse_product_entry(&item, base) {
            Ok(product) => products.push(product),
            Err(e) => warn!("Skipping product entry: {}", e),
        }
    }
    debug!("Parsed {} products from listing page", products.len());
    products
}

/// 判断列表页是否有"下一页"控件
pub fn has_next_page(html: &str) -> bool {
    let document = Html::parse_document(html);
    let next_selector = Selector::parse("a.pagination__next, a[rel='next']").unwrap();
    document.select(&next_selector).next().is_some()
}

/// 提取2407.pl商品列表
///
/// 站点用styled-components类名，价格只有显示文本
pub fn parse_2407_products(html: &str, base: &Url, limit: usize) -> Vec<ProductRecord> {
    let document = Html::parse_document(html);
    let item_selector =
        Selector::parse("div.ListItemstyle__CatalogueListItem-sc-1gf1g4g-6").unwrap();
    let title_selector =
        Selector::parse("a.ListItemTitlestyle__CatalogueListItemTitleLink-sc-904etm-1").unwrap();
    let image_selector = Selector::parse("img").unwrap();
    let price_selector =
        Selector::parse("div.ListItemPricestyle__CatalogueListItemPriceValue-sc-qbj488-3").unwrap();

    let mut products = Vec::new();
    for item in document.select(&item_selector).take(limit) {
        let title_link = match item.select(&title_selector).next() {
            Some(link) => link,
            None => {
                warn!("Skipping 2407 entry without a title link");
                continue;
            }
        };

        // The title attribute carries the full product name; the inner
        // text may be truncated.
        let title = title_link
            .value()
            .attr("title")
            .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| element_text(&title_link));
        if title.is_empty() {
            warn!("Skipping 2407 entry with an empty title");
            continue;
        }

        let url = title_link
            .value()
            .attr("href")
            .and_then(|href| SiteRef::Direct(href.to_string()).resolve(base));

        let image_url = item
            .select(&image_selector)
            .next()
            .and_then(|img| img.value().attr("src"))
            .and_then(|src| SiteRef::Direct(src.to_string()).resolve(base));

        let price_text = item
            .select(&price_selector)
            .next()
            .map(|el| element_text(&el))
            .unwrap_or_default();
        let amount = PRICE_NUMBER
            .find(&price_text.replace('\u{a0}', "").replace(' ', ""))
            .and_then(|m| m.as_str().replace(',', ".").parse::<f64>().ok());

        products.push(ProductRecord {
            title,
            url,
            image_url,
            price: Price {
                amount,
                currency: "PLN".to_string(),
            },
            delivery_time: None,
            specs: HashMap::new(),
        });
    }
    products
}
