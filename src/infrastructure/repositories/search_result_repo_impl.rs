// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::search_result::{SearchResult, SearchResultGroup};
use crate::domain::repositories::search_result_repository::{
    RepositoryError, SearchResultRepository,
};
use crate::infrastructure::database::entities::search_result as search_result_entity;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;

/// 分组聚合查询行
#[derive(Debug, FromQueryResult)]
struct GroupRow {
    search_result_id: i64,
    count: i64,
    latest_created_at: DateTime<FixedOffset>,
}

/// 搜索结果仓库实现
pub struct SearchResultRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl SearchResultRepositoryImpl {
    /// 创建新的搜索结果仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的搜索结果仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SearchResultRepository for SearchResultRepositoryImpl {
    async fn list_groups(&self) -> Result<Vec<SearchResultGroup>, RepositoryError> {
        let rows: Vec<GroupRow> = search_result_entity::Entity::find()
            .select_only()
            .column(search_result_entity::Column::SearchResultId)
            .column_as(search_result_entity::Column::Id.count(), "count")
            .column_as(
                search_result_entity::Column::CreatedAt.max(),
                "latest_created_at",
            )
            .group_by(search_result_entity::Column::SearchResultId)
            .order_by_desc(Expr::col(search_result_entity::Column::CreatedAt).max())
            .into_model::<GroupRow>()
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| SearchResultGroup {
                search_result_id: r.search_result_id,
                count: r.count,
                latest_created_at: DateTime::<Utc>::from(r.latest_created_at),
            })
            .collect())
    }

    async fn find_by_search_id(
        &self,
        search_result_id: i64,
    ) -> Result<Vec<SearchResult>, RepositoryError> {
        let models = search_result_entity::Entity::find()
            .filter(search_result_entity::Column::SearchResultId.eq(search_result_id))
            .order_by_asc(search_result_entity::Column::WebsiteSearchId)
            .all(self.db.as_ref())
            .await?;

        Ok(models
            .into_iter()
            .map(|m| SearchResult {
                search_result_id: m.search_result_id,
                website_search_id: m.website_search_id,
                url: m.url,
                title: m.title,
                price: m.price,
                created_at: DateTime::<Utc>::from(m.created_at),
            })
            .collect())
    }
}
