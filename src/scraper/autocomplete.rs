// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use tracing::{debug, info, warn};

use crate::scraper::matching::soft_match;
use crate::scraper::page::{PageError, SitePage};
use crate::scraper::{parse, Outcome};

const SEARCH_INPUT_SELECTOR: &str = "input#awesomplete.input__field";
const PRODUCT_ITEM_SELECTOR: &str = "li.productList__item";

const INPUT_TIMEOUT: Duration = Duration::from_secs(5);
const RESULTS_TIMEOUT: Duration = Duration::from_secs(10);
const KEYSTROKE_DELAY: Duration = Duration::from_millis(200);
const CURSOR_DELAY: Duration = Duration::from_millis(100);
const CONFIRM_DELAY: Duration = Duration::from_secs(2);

// Autocomplete vocabularies are noisier than brand or model lists, so the
// threshold is looser than the 0.6 used elsewhere.
const SUGGESTION_MATCH_THRESHOLD: f64 = 0.4;

/// 部件自动补全驱动
///
/// 逐字符输入并在每个字符后轮询建议列表；首个非空列表出现时
/// 模糊选择最佳建议并确认。整串输入完仍无建议视为失败，
/// 与"命中但结果为空"是不同的结果
pub async fn search_part(page: &dyn SitePage, part_name: &str) -> Result<Outcome<()>, PageError> {
    info!("Searching for part: {}", part_name);

    if let Err(PageError::Timeout(sel)) = page
        .wait_for_selector(SEARCH_INPUT_SELECTOR, INPUT_TIMEOUT)
        .await
    {
        warn!("Search input never appeared ({})", sel);
        return Ok(Outcome::TimedOut);
    }

    page.clear_value(SEARCH_INPUT_SELECTOR).await?;
    tokio::time::sleep(Duration::from_millis(300)).await;

    let chars: Vec<char> = part_name.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        page.type_text(SEARCH_INPUT_SELECTOR, &c.to_string()).await?;
        tokio::time::sleep(KEYSTROKE_DELAY).await;

        let html = page.content().await?;
        let suggestions = parse::parse_suggestions(&html);
        if suggestions.is_empty() {
            continue;
        }

        let typed: String = chars[..=i].iter().collect();
        info!("Found suggestions after typing: '{}'", typed);
        debug!("Available suggestions: {:?}", suggestions);

        let lowered: Vec<String> = suggestions.iter().map(|s| s.to_lowercase()).collect();
        let cursor_steps = match soft_match(
            &part_name.to_lowercase(),
            &lowered,
            SUGGESTION_MATCH_THRESHOLD,
        ) {
            Some(idx) => {
                info!("Selecting best match: {}", suggestions[idx]);
                idx + 1
            }
            None => {
                info!("Using first suggestion: {}", suggestions[0]);
                1
            }
        };

        for _ in 0..cursor_steps {
            page.press_key(SEARCH_INPUT_SELECTOR, "ArrowDown").await?;
            tokio::time::sleep(CURSOR_DELAY).await;
        }
        page.press_key(SEARCH_INPUT_SELECTOR, "Enter").await?;
        tokio::time::sleep(CONFIRM_DELAY).await;

        // Matched but empty results is still a successful search.
        match page
            .wait_for_selector(PRODUCT_ITEM_SELECTOR, RESULTS_TIMEOUT)
            .await
        {
            Ok(()) => info!("Products loaded successfully"),
            Err(_) => debug!("Results page loaded (may have no products)"),
        }

        return Ok(Outcome::Found(()));
    }

    warn!(
        "No suggestions found for '{}' - product may not be available",
        part_name
    );
    Ok(Outcome::NotFound)
}
