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

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    /// 应用数据库迁移
    ///
    /// # 参数
    ///
    /// * `manager` - 数据库模式管理器
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 迁移成功
    /// * `Err(DbErr)` - 迁移失败
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // search_results rows are written by the external webhook worker and
        // read back by this service, never mutated.
        manager
            .create_table(
                Table::create()
                    .table(SearchResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SearchResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SearchResults::SearchResultId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SearchResults::WebsiteSearchId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(SearchResults::Url).text().not_null())
                    .col(
                        ColumnDef::new(SearchResults::Title)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(SearchResults::Price).double().not_null())
                    .col(
                        ColumnDef::new(SearchResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_search_results_search_result_id")
                    .table(SearchResults::Table)
                    .col(SearchResults::SearchResultId)
                    .to_owned(),
            )
            .await?;

        // A logical search never produces two rows for the same source.
        manager
            .create_index(
                Index::create()
                    .name("uq_search_results_search_website")
                    .table(SearchResults::Table)
                    .col(SearchResults::SearchResultId)
                    .col(SearchResults::WebsiteSearchId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    /// 回滚数据库迁移
    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SearchResults::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum SearchResults {
    Table,
    Id,
    SearchResultId,
    WebsiteSearchId,
    Url,
    Title,
    Price,
    CreatedAt,
}
