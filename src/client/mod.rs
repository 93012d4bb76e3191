//! 目录服务客户端
//!
//! 每次调用对应一个 HTTP 请求，不重试、不退避、不去重：
//!
//! | Method | Path | 操作 |
//! |--------|------|------|
//! | GET    | `/products` | 列出全部商品文档 |
//! | POST   | `/products` | 创建商品，返回带 `_id` 的文档 |
//! | PUT    | `/products` | 更新商品，请求体 `{id, ...fields}` |
//! | DELETE | `/products?id=<id>` | 删除商品，返回 `{success: true}` |

pub mod error;

pub use error::SyncError;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::app::catalog::model::{ProductDocument, ProductId, ProductInput, UpdateProductBody};
use crate::config::ClientConfig;
use crate::core::response::SuccessResponse;

/// 远程目录服务
#[async_trait]
pub trait CatalogRemote: Send + Sync {
    async fn list(&self) -> Result<Vec<ProductDocument>, SyncError>;

    async fn create(&self, input: &ProductInput) -> Result<ProductDocument, SyncError>;

    async fn update(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<ProductDocument, SyncError>;

    async fn delete(&self, id: &ProductId) -> Result<SuccessResponse, SyncError>;
}

/// 基于 reqwest 的目录服务客户端
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    products_url: String,
}

impl HttpCatalogClient {
    pub fn new(config: &ClientConfig) -> Result<Self, SyncError> {
        let base_url = url::Url::parse(&config.base_url)
            .map_err(|e| SyncError::Config(format!("{}: {}", config.base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SyncError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            products_url: format!("{}/products", base_url.as_str().trim_end_matches('/')),
        })
    }

    /// 发送请求并解析 JSON 响应
    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SyncError> {
        debug!("catalog request: {}", endpoint);

        let resp = request.send().await.map_err(|e| SyncError::Http {
            endpoint: endpoint.into(),
            source: e,
        })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| SyncError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}

#[async_trait]
impl CatalogRemote for HttpCatalogClient {
    async fn list(&self) -> Result<Vec<ProductDocument>, SyncError> {
        self.send("GET /products", self.http.get(&self.products_url))
            .await
    }

    async fn create(&self, input: &ProductInput) -> Result<ProductDocument, SyncError> {
        self.send("POST /products", self.http.post(&self.products_url).json(input))
            .await
    }

    async fn update(
        &self,
        id: &ProductId,
        input: &ProductInput,
    ) -> Result<ProductDocument, SyncError> {
        let body = UpdateProductBody { id, input };
        self.send("PUT /products", self.http.put(&self.products_url).json(&body))
            .await
    }

    async fn delete(&self, id: &ProductId) -> Result<SuccessResponse, SyncError> {
        let request = self
            .http
            .delete(&self.products_url)
            .query(&[("id", id.to_string())]);
        self.send("DELETE /products", request).await
    }
}
