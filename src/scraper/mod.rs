// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 部件自动补全驱动
pub mod autocomplete;

/// autoparts-24抓取流水线
pub mod autoparts24;

/// 2407.pl抓取流水线
pub mod marketplace2407;

/// 模糊匹配与文本归一化
pub mod matching;

/// 页面驱动抽象与chromiumoxide实现
pub mod page;

/// HTML解析
pub mod parse;

/// 品牌与车型解析器
pub mod resolve;

/// 单步解析结果
///
/// 流水线各阶段通过显式结果分支，而不是依赖被捕获的异常
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    /// 命中
    Found(T),
    /// 未命中
    NotFound,
    /// 等待超时
    TimedOut,
}
