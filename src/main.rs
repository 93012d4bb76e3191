//! 商品目录服务
//!
//! 配置了 `DATABASE_URL`（或配置文件中的 `database.url`）时使用 PostgreSQL 文档存储，
//! 否则使用内存存储。

use boutique_catalog::{app, config, infrastructure};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_config()?;

    // 初始化日志，guard 需要一直持有
    let _guard = infrastructure::logger::Logger::init(&config.logging)?;

    info!("启动商品目录服务...");

    let repository = infrastructure::open_repository(&config.database).await?;
    let app = app::build_app(
        repository,
        Duration::from_secs(config.server.timeout_seconds),
    );

    let listener = TcpListener::bind(config.server.socket_addr()).await?;
    let addr = listener.local_addr()?;

    info!("🚀 商品目录服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /products         - 获取全部商品");
    info!("   POST   /products         - 创建商品");
    info!("   PUT    /products         - 更新商品 (请求体 {{id, ...fields}})");
    info!("   DELETE /products?id=<id> - 删除商品");
    info!("   GET    /health           - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("商品目录服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听退出信号: {}", e);
        std::future::pending::<()>().await;
    }
    info!("收到退出信号，正在关闭...");
}
