// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配件搜索请求DTO
pub mod parts_search_request;

/// 抓取请求DTO
pub mod scrape_request;
