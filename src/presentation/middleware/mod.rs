// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// IP速率限制中间件
pub mod rate_limit_middleware;

pub use rate_limit_middleware::{new_ip_limiter, rate_limit, IpRateLimiter};
