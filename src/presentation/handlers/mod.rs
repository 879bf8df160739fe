// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配件搜索代理处理器
pub mod parts_search_handler;

/// 搜索结果查询处理器
pub mod results_handler;

/// 抓取处理器
pub mod scrape_handler;

/// 会话查询处理器
pub mod session_handler;
