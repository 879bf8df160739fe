// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 表示层模块
///
/// 该模块负责处理HTTP请求和响应，是系统对外的接口层。
///
/// 包含的子模块：
/// - 错误（errors）：统一的应用错误到HTTP响应映射
/// - 处理器（handlers）：各端点的请求处理逻辑
/// - 中间件（middleware）：速率限制等横切关注点
/// - 路由（routes）：路由表组装
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
