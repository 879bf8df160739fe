// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用层模块
///
/// 该模块承载请求与响应的数据传输对象，
/// 隔离表示层的序列化格式与领域模型。
pub mod dto;
