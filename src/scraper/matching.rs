// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Datelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9\s]").unwrap());

/// 将站点名称转为URL slug
///
/// 小写后把所有非字母数字序列折叠为单个连字符
pub fn slugify(name: &str) -> String {
    NON_SLUG
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

/// 模糊匹配
///
/// 在候选列表中返回相似度最高且不低于阈值的候选下标。
/// 相同输入总是产生相同输出：遍历顺序固定，打平时保留先出现的候选。
pub fn soft_match(input: &str, candidates: &[String], threshold: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, candidate) in candidates.iter().enumerate() {
        let score = strsim::normalized_levenshtein(input, candidate);
        if score < threshold {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// 归一化车型名
///
/// 小写、去掉开头的品牌前缀、把特殊字符折叠为空格
pub fn normalize_model_name(model: &str, brand: Option<&str>) -> String {
    let mut model = model.to_lowercase();

    if let Some(brand) = brand {
        let prefix = format!("{} ", brand.to_lowercase());
        if let Some(rest) = model.strip_prefix(&prefix) {
            model = rest.to_string();
        }
    }

    let model = NON_ALNUM.replace_all(&model, " ");
    model.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// 解析年份区间文本
///
/// 支持"2009 - 2017"和"2016 - Now"两种格式，"Now"解析为当前年份。
/// 无法解析出两个整数的文本返回(None, None)，该区间永远不包含任何年份。
pub fn parse_year_range(year_text: &str) -> (Option<i32>, Option<i32>) {
    let parts: Vec<&str> = year_text.trim().split('-').collect();
    if parts.len() != 2 {
        return (None, None);
    }

    let start = match parts[0].trim().parse::<i32>() {
        Ok(y) => y,
        Err(_) => return (None, None),
    };

    let end_part = parts[1].trim();
    let end = if end_part.eq_ignore_ascii_case("now") {
        Utc::now().year()
    } else {
        match end_part.parse::<i32>() {
            Ok(y) => y,
            Err(_) => return (None, None),
        }
    };

    (Some(start), Some(end))
}

/// 判断年份是否落在区间内
///
/// 任一参数为空即为false
pub fn year_in_range(year: Option<i32>, start: Option<i32>, end: Option<i32>) -> bool {
    match (year, start, end) {
        (Some(y), Some(s), Some(e)) => s <= y && y <= e,
        _ => false,
    }
}
