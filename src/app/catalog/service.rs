//! 商品目录业务服务

use std::sync::Arc;
use tracing::{info, warn};
use validator::Validate;

use super::model::{DocumentId, ProductDocument, ProductInput, UpdateProductRequest};
use super::repository::ProductRepository;
use crate::core::error::CoreError;

#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub fn backend(&self) -> &'static str {
        self.repository.backend()
    }

    pub async fn list_products(&self) -> Result<Vec<ProductDocument>, CoreError> {
        self.repository.list().await
    }

    pub async fn create_product(&self, input: ProductInput) -> Result<ProductDocument, CoreError> {
        input.validate()?;

        let doc = self.repository.create(input).await?;
        info!("Created product: {} ({})", doc.name, doc.id);
        Ok(doc)
    }

    pub async fn update_product(
        &self,
        request: UpdateProductRequest,
    ) -> Result<ProductDocument, CoreError> {
        let id = DocumentId::try_from(&request.id)?;
        request.patch.validate()?;

        match self.repository.update(&id, request.patch).await? {
            Some(doc) => {
                info!("Updated product: {} ({})", doc.name, doc.id);
                Ok(doc)
            }
            None => Err(CoreError::NotFound(format!("商品 {} 不存在", id))),
        }
    }

    /// 删除商品；目标不存在时同样视为成功
    pub async fn delete_product(&self, raw_id: Option<&str>) -> Result<(), CoreError> {
        let raw_id = raw_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| CoreError::BadRequest("缺少查询参数 id".to_string()))?;
        let id = DocumentId::parse(raw_id)?;

        if self.repository.delete(&id).await? {
            info!("Deleted product: {}", id);
        } else {
            warn!("Delete requested for unknown product: {}", id);
        }
        Ok(())
    }

    /// 清空目录并写入给定商品，供初始化数据使用
    pub async fn replace_all(
        &self,
        inputs: Vec<ProductInput>,
    ) -> Result<Vec<ProductDocument>, CoreError> {
        for input in &inputs {
            input.validate()?;
        }

        let removed = self.repository.clear().await?;
        info!("Cleared {} existing products", removed);

        let created = self.repository.insert_many(inputs).await?;
        info!("Inserted {} products", created.len());
        Ok(created)
    }
}
