//! 商品目录处理器

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use super::{
    model::{ProductDocument, ProductInput, UpdateProductRequest},
    service::ProductService,
};
use crate::core::{error::CoreError, response::SuccessResponse};

#[derive(Clone)]
pub struct AppState {
    pub product_service: ProductService,
}

// 删除接口的查询参数
#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

/// 获取全部商品
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductDocument>>, CoreError> {
    let products = state.product_service.list_products().await?;
    Ok(Json(products))
}

/// 创建商品
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<ProductInput>,
) -> Result<Json<ProductDocument>, CoreError> {
    let product = state.product_service.create_product(payload).await?;
    Ok(Json(product))
}

/// 更新商品，请求体为 `{id, ...fields}`
pub async fn update_product(
    State(state): State<AppState>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductDocument>, CoreError> {
    let product = state.product_service.update_product(payload).await?;
    Ok(Json(product))
}

/// 删除商品：`DELETE /products?id=<id>`
pub async fn delete_product(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<SuccessResponse>, CoreError> {
    state
        .product_service
        .delete_product(query.id.as_deref())
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// 健康检查
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, CoreError> {
    let products = state.product_service.list_products().await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "storage": state.product_service.backend(),
        "products": products.len()
    })))
}
