// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::models::search_result::{SearchResult, SearchResultGroup};

/// 仓库层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库错误: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for RepositoryError {
    fn from(err: sea_orm::DbErr) -> Self {
        RepositoryError::Database(err.to_string())
    }
}

/// 搜索结果仓库接口
///
/// 写入路径在外部Webhook工作流中，本服务只暴露只读查询
#[async_trait]
pub trait SearchResultRepository: Send + Sync {
    /// 按search_result_id分组聚合，按最新创建时间倒序
    async fn list_groups(&self) -> Result<Vec<SearchResultGroup>, RepositoryError>;

    /// 查询某个分组下的全部结果行，按website_search_id升序；
    /// 分组不存在时返回空列表
    async fn find_by_search_id(
        &self,
        search_result_id: i64,
    ) -> Result<Vec<SearchResult>, RepositoryError>;
}
