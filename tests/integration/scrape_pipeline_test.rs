// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use partscout::scraper::autoparts24::{Autoparts24Scraper, ScrapeParams};
use partscout::scraper::page::{PageError, SitePage};

const LANDING_HTML: &str = r#"
    <a class="SUBCATEGORY_ITEM" href="/parts/">Parts</a>
    <div class="manufacturer-grid-item">
      <div class="categorySearch__brandInfo"><b>BMW</b></div>
    </div>
    <div class="manufacturer-grid-item">
      <div class="categorySearch__brandInfo"><b>Mercedes-Benz</b></div>
    </div>
    <div class="manufacturer-grid-item">
      <div class="categorySearch__brandInfo"><b>Volkswagen</b></div>
    </div>
"#;

const BRAND_PAGE_HTML: &str = r#"
    <div class="findingParts__modelGroups__model_headline">
      <a class="link" href="/bmw/5-g30/">BMW 5 G30</a>
    </div>
    <div class="findingParts__modelGroups__model_headline">
      <a class="link" href="/bmw/3-e90/">BMW 3 E90</a>
    </div>
    <input id="awesomplete" class="input__field">
"#;

const SUGGESTIONS_HTML: &str = r#"
    <div class="awesomplete">
      <ul>
        <li>Brake pads</li>
        <li>Brake discs</li>
      </ul>
    </div>
"#;

const RESULTS_PAGE_1: &str = r#"
    <ul>
      <li class="productList__item">
        <div class="productList__title"><a href="/p/1">Brake pad set front</a></div>
        <span class="productList__price">
          <span id="price-1" data-price="49.90"></span>
          <span itemprop="priceCurrency">EUR</span>
        </span>
      </li>
      <li class="productList__item">
        <div class="productList__title"><a href="/p/2">Brake pad set rear</a></div>
        <span class="productList__price">
          <span id="price-2" data-price="39.90"></span>
          <span itemprop="priceCurrency">EUR</span>
        </span>
      </li>
    </ul>
    <a class="pagination__next" href="/page/2">Next</a>
"#;

const RESULTS_PAGE_2: &str = r#"
    <ul>
      <li class="productList__item">
        <div class="productList__title"><a href="/p/3">Brake pad wear sensor</a></div>
      </li>
    </ul>
"#;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Stage {
    Landing,
    BrandPage,
    Results(usize),
}

/// 脚本化的站点页面
///
/// 按抓取流水线会触发的交互推进内部状态机，
/// 不需要真实浏览器即可走完整条流水线
struct MockPage {
    stage: Mutex<Stage>,
    typed: Mutex<String>,
    offer_suggestions: bool,
    brands_html: &'static str,
}

impl MockPage {
    fn new() -> Self {
        Self {
            stage: Mutex::new(Stage::Landing),
            typed: Mutex::new(String::new()),
            offer_suggestions: true,
            brands_html: LANDING_HTML,
        }
    }

    fn without_suggestions() -> Self {
        Self {
            offer_suggestions: false,
            ..Self::new()
        }
    }

    fn with_empty_brand_grid() -> Self {
        Self {
            brands_html: "<a class=\"SUBCATEGORY_ITEM\" href=\"/parts/\">Parts</a>",
            ..Self::new()
        }
    }
}

#[async_trait]
impl SitePage for MockPage {
    async fn goto(&self, _url: &str) -> Result<(), PageError> {
        Ok(())
    }

    async fn content(&self) -> Result<String, PageError> {
        let stage = *self.stage.lock().unwrap();
        let html = match stage {
            Stage::Landing => self.brands_html.to_string(),
            Stage::BrandPage => {
                let typed = self.typed.lock().unwrap();
                if self.offer_suggestions && typed.chars().count() >= 3 {
                    format!("{BRAND_PAGE_HTML}{SUGGESTIONS_HTML}")
                } else {
                    BRAND_PAGE_HTML.to_string()
                }
            }
            Stage::Results(0) => RESULTS_PAGE_1.to_string(),
            Stage::Results(_) => RESULTS_PAGE_2.to_string(),
        };
        Ok(html)
    }

    async fn click(&self, selector: &str) -> Result<(), PageError> {
        let mut stage = self.stage.lock().unwrap();
        if selector.contains("pagination__next") {
            if let Stage::Results(page) = *stage {
                *stage = Stage::Results(page + 1);
            }
        } else if *stage == Stage::Landing && selector.contains("/bmw/") {
            *stage = Stage::BrandPage;
        }
        Ok(())
    }

    async fn click_by_text(&self, _text: &str) -> Result<(), PageError> {
        Ok(())
    }

    async fn clear_value(&self, _selector: &str) -> Result<(), PageError> {
        self.typed.lock().unwrap().clear();
        Ok(())
    }

    async fn type_text(&self, _selector: &str, text: &str) -> Result<(), PageError> {
        self.typed.lock().unwrap().push_str(text);
        Ok(())
    }

    async fn press_key(&self, _selector: &str, key: &str) -> Result<(), PageError> {
        if key == "Enter" {
            *self.stage.lock().unwrap() = Stage::Results(0);
        }
        Ok(())
    }

    async fn wait_for_selector(
        &self,
        _selector: &str,
        _timeout: Duration,
    ) -> Result<(), PageError> {
        Ok(())
    }

    async fn wait_for_network_idle(&self, _timeout: Duration) -> Result<(), PageError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), PageError> {
        Ok(())
    }
}

fn scraper() -> Autoparts24Scraper {
    Autoparts24Scraper::new("https://www.autoparts-24.com/").unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_full_pipeline_collects_all_pages() {
    let page = MockPage::new();
    let params = ScrapeParams {
        part_name: "Brake pads".to_string(),
        brand: "bmw".to_string(),
        model: Some("5 G30".to_string()),
        year: Some(2018),
        max_pages: 2,
    };

    let outcome = scraper().run(&page, &params).await;

    assert_eq!(outcome.error, None);
    // Lowercase user input resolved to the site's spelling.
    assert_eq!(outcome.brand, "BMW");
    assert_eq!(outcome.model.as_deref(), Some("5 G30"));
    assert_eq!(outcome.total_products, 3);
    assert_eq!(outcome.products.len(), 3);
    assert!(outcome.products.iter().all(|p| !p.title.is_empty()));
    assert_eq!(outcome.products[0].price.amount, Some(49.90));
}

#[tokio::test(start_paused = true)]
async fn test_pagination_respects_page_cap() {
    let page = MockPage::new();
    let params = ScrapeParams {
        part_name: "Brake pads".to_string(),
        brand: "BMW".to_string(),
        model: None,
        year: None,
        max_pages: 1,
    };

    let outcome = scraper().run(&page, &params).await;

    assert_eq!(outcome.error, None);
    // Page 2 exists but the cap stops after the first listing page.
    assert_eq!(outcome.total_products, 2);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_brand_reports_not_found() {
    let page = MockPage::with_empty_brand_grid();
    let params = ScrapeParams {
        part_name: "Brake pads".to_string(),
        brand: "Lada".to_string(),
        model: None,
        year: None,
        max_pages: 1,
    };

    let outcome = scraper().run(&page, &params).await;

    assert_eq!(outcome.error.as_deref(), Some("Brand not found"));
    assert_eq!(outcome.brand, "Lada");
    assert!(outcome.products.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_no_suggestions_reports_search_failure() {
    let page = MockPage::without_suggestions();
    let params = ScrapeParams {
        part_name: "flux capacitor".to_string(),
        brand: "BMW".to_string(),
        model: None,
        year: None,
        max_pages: 1,
    };

    let outcome = scraper().run(&page, &params).await;

    assert_eq!(outcome.error.as_deref(), Some("Search failed"));
    assert_eq!(outcome.brand, "BMW");
    assert!(outcome.products.is_empty());
}
