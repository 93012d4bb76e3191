//! 商品目录服务：`/products` 的列表、创建、更新、删除

pub mod handler;
pub mod model;
pub mod repository;
pub mod service;

use axum::{routing::get, Router};

pub use handler::AppState;

/// 创建目录服务路由
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handler::health_check))
        .route(
            "/products",
            get(handler::list_products)
                .post(handler::create_product)
                .put(handler::update_product)
                .delete(handler::delete_product),
        )
}
