//! 商品文档存储

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::model::{DocumentId, ProductDocument, ProductInput, ProductPatch};
use crate::core::error::CoreError;

/// 文档存储接口，目录服务只依赖这一层
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 按创建顺序返回全部文档
    async fn list(&self) -> Result<Vec<ProductDocument>, CoreError>;

    async fn create(&self, input: ProductInput) -> Result<ProductDocument, CoreError>;

    /// 覆盖补丁中提供的字段，文档不存在时返回 `None`
    async fn update(
        &self,
        id: &DocumentId,
        patch: ProductPatch,
    ) -> Result<Option<ProductDocument>, CoreError>;

    /// 返回是否真的删除了文档
    async fn delete(&self, id: &DocumentId) -> Result<bool, CoreError>;

    /// 清空存储，返回删除的数量
    async fn clear(&self) -> Result<u64, CoreError>;

    async fn insert_many(
        &self,
        inputs: Vec<ProductInput>,
    ) -> Result<Vec<ProductDocument>, CoreError>;

    /// 存储后端名称，用于健康检查
    fn backend(&self) -> &'static str;
}

/// 内存文档存储
#[derive(Clone, Default)]
pub struct MemoryProductRepository {
    documents: Arc<RwLock<Vec<ProductDocument>>>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn list(&self) -> Result<Vec<ProductDocument>, CoreError> {
        Ok(self.documents.read().await.clone())
    }

    async fn create(&self, input: ProductInput) -> Result<ProductDocument, CoreError> {
        let doc = ProductDocument::create(input);
        self.documents.write().await.push(doc.clone());
        Ok(doc)
    }

    async fn update(
        &self,
        id: &DocumentId,
        patch: ProductPatch,
    ) -> Result<Option<ProductDocument>, CoreError> {
        let mut documents = self.documents.write().await;
        Ok(documents.iter_mut().find(|doc| doc.id == *id).map(|doc| {
            doc.apply(patch);
            doc.clone()
        }))
    }

    async fn delete(&self, id: &DocumentId) -> Result<bool, CoreError> {
        let mut documents = self.documents.write().await;
        let before = documents.len();
        documents.retain(|doc| doc.id != *id);
        Ok(documents.len() != before)
    }

    async fn clear(&self) -> Result<u64, CoreError> {
        let mut documents = self.documents.write().await;
        let removed = documents.len() as u64;
        documents.clear();
        Ok(removed)
    }

    async fn insert_many(
        &self,
        inputs: Vec<ProductInput>,
    ) -> Result<Vec<ProductDocument>, CoreError> {
        let created: Vec<ProductDocument> =
            inputs.into_iter().map(ProductDocument::create).collect();
        self.documents.write().await.extend(created.iter().cloned());
        Ok(created)
    }

    fn backend(&self) -> &'static str {
        "in-memory"
    }
}
