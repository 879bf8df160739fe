// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use dashmap::DashMap;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;
use uuid::Uuid;

/// 缓存条目
///
/// 过期检查基于tokio时钟，测试中可暂停和快进
struct CacheEntry {
    data: Value,
    created_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }
}

/// 会话缓存
///
/// 结果负载以不透明的会话ID存储，固定TTL后过期。
/// 实例通过句柄注入，没有全局状态
pub struct SessionCache {
    entries: DashMap<Uuid, CacheEntry>,
    ttl: Duration,
}

impl SessionCache {
    /// 创建新的会话缓存
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// 使用TTL（分钟）创建会话缓存
    pub fn with_ttl_minutes(minutes: u64) -> Self {
        Self::new(Duration::from_secs(minutes * 60))
    }

    /// 存储负载并返回新分配的会话ID
    pub fn store(&self, data: Value) -> Uuid {
        let session_id = Uuid::new_v4();
        self.entries.insert(
            session_id,
            CacheEntry {
                data,
                created_at: Instant::now(),
                ttl: self.ttl,
            },
        );
        debug!("Stored session {}", session_id);
        session_id
    }

    /// 按会话ID读取负载
    ///
    /// 过期条目在读取时移除；过期与不存在不可区分
    pub fn get(&self, session_id: &Uuid) -> Option<Value> {
        let entry = self.entries.get(session_id)?;
        if entry.is_expired() {
            drop(entry);
            self.entries.remove(session_id);
            debug!("Session {} expired", session_id);
            return None;
        }
        Some(entry.data.clone())
    }

    /// 清理所有过期条目
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    /// 当前条目数（含未清理的过期条目）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 启动周期性清理任务
///
/// get只在精确命中时移除过期条目，从未被读取的会话
/// 需要后台任务回收
pub fn start_purge_task(
    cache: Arc<SessionCache>,
    every: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            let purged = cache.purge_expired();
            if purged > 0 {
                debug!("Purged {} expired sessions", purged);
            }
        }
    })
}
