//! 基础设施层：日志、数据库

#[cfg(feature = "database")]
pub mod database;
pub mod logger;

use std::sync::Arc;
use tracing::info;

use crate::app::catalog::repository::{MemoryProductRepository, ProductRepository};
use crate::config::DatabaseConfig;

/// 按配置打开文档存储：配置了连接串时使用 PostgreSQL，否则使用内存存储
pub async fn open_repository(
    config: &DatabaseConfig,
) -> anyhow::Result<Arc<dyn ProductRepository>> {
    #[cfg(feature = "database")]
    if !config.url.is_empty() {
        let manager = database::DatabaseManager::new(config).await?;
        manager.ensure_schema().await?;
        return Ok(Arc::new(manager.product_repository()));
    }

    #[cfg(not(feature = "database"))]
    if !config.url.is_empty() {
        tracing::warn!("database feature is disabled, ignoring configured database url");
    }

    info!("Using in-memory product storage");
    Ok(Arc::new(MemoryProductRepository::new()))
}
