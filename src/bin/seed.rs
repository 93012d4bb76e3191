//! 初始化目录数据：清空现有商品并写入示例商品

use boutique_catalog::app::catalog::service::ProductService;
use boutique_catalog::{config, infrastructure, samples};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_config()?;
    let _guard = infrastructure::logger::Logger::init(&config.logging)?;

    if config.database.url.is_empty() {
        error!("未配置 DATABASE_URL，内存存储无法保存初始化数据");
        anyhow::bail!("DATABASE_URL is required for seeding");
    }

    let repository = infrastructure::open_repository(&config.database).await?;
    info!("Connected to {} storage", repository.backend());

    let service = ProductService::new(repository);
    let created = service
        .replace_all(samples::sample_products())
        .await?;

    info!("Database seeded successfully with {} products", created.len());
    Ok(())
}
