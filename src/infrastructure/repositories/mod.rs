// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索结果仓库实现
pub mod search_result_repo_impl;

pub use search_result_repo_impl::SearchResultRepositoryImpl;
