// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 会话缓存
pub mod session_cache;

pub use session_cache::{start_purge_task, SessionCache};
