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

use axum::Extension;
use partscout::config::settings::Settings;
use partscout::infrastructure::cache::{start_purge_task, SessionCache};
use partscout::infrastructure::database::connection;
use partscout::infrastructure::repositories::SearchResultRepositoryImpl;
use partscout::infrastructure::services::PartWebhookClient;
use partscout::presentation::middleware::new_ip_limiter;
use partscout::presentation::routes;
use partscout::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting partscout...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    let db = connection::create_pool(&settings.database).await?;
    let db = Arc::new(db);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize Components
    let result_repo = Arc::new(SearchResultRepositoryImpl::new(db.clone()));
    let session_cache = Arc::new(SessionCache::with_ttl_minutes(
        settings.cache.session_ttl_minutes,
    ));
    let webhook_client = Arc::new(PartWebhookClient::new(
        settings.webhook.url.clone(),
        settings.webhook.timeout_secs,
    ));

    // Reclaim sessions that are never read back.
    start_purge_task(
        session_cache.clone(),
        std::time::Duration::from_secs(60),
    );

    // 5. Initialize Rate Limiter
    let rate_limiter = if settings.rate_limiting.enabled {
        info!(
            "Rate limiting enabled: {} requests per minute per IP",
            settings.rate_limiting.parts_search_rpm
        );
        Some(new_ip_limiter(settings.rate_limiting.parts_search_rpm))
    } else {
        None
    };

    // 6. Start HTTP server
    let app = routes::routes(rate_limiter)
        .layer(Extension(result_repo))
        .layer(Extension(session_cache))
        .layer(Extension(webhook_client))
        .layer(Extension(settings.clone()))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
