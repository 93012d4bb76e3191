//! 应用层

pub mod catalog;

use axum::{middleware, Router};
use std::{sync::Arc, time::Duration};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::core::middleware::request_logging_middleware;
use catalog::{repository::ProductRepository, service::ProductService, AppState};

/// 组装完整的目录服务应用（路由 + 中间件）
pub fn build_app(repository: Arc<dyn ProductRepository>, request_timeout: Duration) -> Router {
    let state = AppState {
        product_service: ProductService::new(repository),
    };

    catalog::routes()
        // 应用中间件层 (按顺序应用)
        .layer(middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
