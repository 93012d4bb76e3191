//! 客户端商品仓库
//!
//! [`CatalogStore`] 持有客户端可见的全部商品，所有修改先同步作用于本地集合，
//! 再在独立的 tokio 任务中向目录服务发起对应请求：
//!
//! - 创建成功后，用服务端返回的记录替换临时记录（按临时编号匹配）
//! - 请求失败只记录日志，本地修改不回滚
//! - 更新和删除的响应不回写本地
//!
//! 同一商品上交错的修改没有任何版本控制，以最后落地的一次为准。
//! 同步任务提交到当前的 tokio 运行时；不在运行时中调用时只修改本地集合，
//! 远程请求不会发出并记录错误日志。

pub mod provisional;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::app::catalog::model::{Product, ProductId, ProductInput};
use crate::client::CatalogRemote;
use provisional::ProvisionalIds;

/// 初始加载的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// 远程集合非空，本地集合被整体替换
    Replaced(usize),
    /// 远程集合为空，本地保持不变
    Empty,
    /// 请求失败，本地保持不变
    Failed,
}

struct StoreInner {
    products: Mutex<Vec<Product>>,
    remote: Arc<dyn CatalogRemote>,
    ids: ProvisionalIds,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

/// 客户端商品仓库，克隆后共享同一份集合
#[derive(Clone)]
pub struct CatalogStore {
    inner: Arc<StoreInner>,
}

impl CatalogStore {
    pub fn new(remote: Arc<dyn CatalogRemote>) -> Self {
        Self::with_products(remote, Vec::new())
    }

    /// 以默认商品初始化，初始加载成功后会被整体替换
    pub fn with_products(remote: Arc<dyn CatalogRemote>, products: Vec<Product>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                products: Mutex::new(products),
                remote,
                ids: ProvisionalIds::new(),
                tasks: Mutex::new(Vec::new()),
            }),
        }
    }

    fn products_mut(&self) -> MutexGuard<'_, Vec<Product>> {
        self.inner
            .products
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// 当前集合的快照
    pub fn products(&self) -> Vec<Product> {
        self.products_mut().clone()
    }

    pub fn get(&self, id: &ProductId) -> Option<Product> {
        self.products_mut().iter().find(|p| p.id == *id).cloned()
    }

    pub fn len(&self) -> usize {
        self.products_mut().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products_mut().is_empty()
    }

    /// 初始加载：远程集合非空时整体替换本地集合
    pub async fn load(&self) -> LoadOutcome {
        match self.inner.remote.list().await {
            Ok(documents) if documents.is_empty() => {
                info!("Remote catalog is empty, keeping {} local products", self.len());
                LoadOutcome::Empty
            }
            Ok(documents) => {
                let loaded: Vec<Product> = documents.into_iter().map(Product::from).collect();
                let count = loaded.len();
                *self.products_mut() = loaded;
                info!("Loaded {} products from remote catalog", count);
                LoadOutcome::Replaced(count)
            }
            Err(e) => {
                error!("Failed to load remote catalog: {}", e);
                LoadOutcome::Failed
            }
        }
    }

    /// 添加商品：立即以临时编号加入集合并返回该记录，随后异步创建远程商品
    pub fn add_product(&self, input: ProductInput) -> Product {
        let provisional = {
            let mut products = self.products_mut();
            let mut id = self.inner.ids.next();
            while products.iter().any(|p| p.id == ProductId::Provisional(id)) {
                id = self.inner.ids.next();
            }

            let product = Product::from_input(ProductId::Provisional(id), input.clone());
            products.push(product.clone());
            product
        };

        let store = self.clone();
        let provisional_id = provisional.id.clone();
        self.spawn_sync(async move {
            match store.inner.remote.create(&input).await {
                Ok(document) => store.confirm(&provisional_id, Product::from(document)),
                Err(e) => error!("Failed to sync new product {}: {}", provisional_id, e),
            }
        });

        provisional
    }

    /// 更新商品：立即覆盖本地记录，远程更新的结果不回写
    pub fn update_product(&self, id: ProductId, input: ProductInput) {
        {
            let mut products = self.products_mut();
            match products.iter_mut().find(|p| p.id == id) {
                Some(slot) => *slot = Product::from_input(id.clone(), input.clone()),
                None => warn!("Update requested for unknown product {}", id),
            }
        }

        let store = self.clone();
        self.spawn_sync(async move {
            if let Err(e) = store.inner.remote.update(&id, &input).await {
                error!("Failed to sync update of product {}: {}", id, e);
            }
        });
    }

    /// 删除商品：立即移除本地记录，远程删除不确认
    pub fn delete_product(&self, id: ProductId) {
        self.products_mut().retain(|p| p.id != id);

        let store = self.clone();
        self.spawn_sync(async move {
            if let Err(e) = store.inner.remote.delete(&id).await {
                error!("Failed to sync deletion of product {}: {}", id, e);
            }
        });
    }

    /// 等待目前为止发起的所有同步任务结束
    pub async fn settle(&self) {
        loop {
            let pending = std::mem::take(
                &mut *self
                    .inner
                    .tasks
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            );
            if pending.is_empty() {
                break;
            }
            for handle in pending {
                if let Err(e) = handle.await {
                    warn!("Sync task did not complete: {}", e);
                }
            }
        }
    }

    fn spawn_sync<F>(&self, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime.spawn(task),
            Err(e) => {
                error!("No tokio runtime available, remote sync skipped: {}", e);
                return;
            }
        };
        let mut tasks = self
            .inner
            .tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|h| !h.is_finished());
        tasks.push(handle);
    }

    /// 用服务端确认的记录替换临时记录
    ///
    /// 只按临时编号匹配；临时记录已不在集合中时丢弃确认结果。
    /// 若集合中已有相同的服务端编号，则移除临时记录以保持编号唯一。
    fn confirm(&self, provisional_id: &ProductId, confirmed: Product) {
        let mut products = self.products_mut();
        let Some(index) = products.iter().position(|p| p.id == *provisional_id) else {
            warn!(
                "Provisional product {} no longer present, dropping confirmation for {}",
                provisional_id, confirmed.id
            );
            return;
        };

        if products.iter().any(|p| p.id == confirmed.id) {
            products.remove(index);
        } else {
            info!("Product {} confirmed as {}", provisional_id, confirmed.id);
            products[index] = confirmed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::catalog::model::{DocumentId, ProductDocument};
    use crate::client::SyncError;
    use crate::core::response::SuccessResponse;
    use async_trait::async_trait;

    /// 创建总是成功、其余请求总是失败的远程实现
    struct CreateOnlyRemote;

    #[async_trait]
    impl CatalogRemote for CreateOnlyRemote {
        async fn list(&self) -> Result<Vec<ProductDocument>, SyncError> {
            Err(SyncError::Config("offline".into()))
        }

        async fn create(&self, input: &ProductInput) -> Result<ProductDocument, SyncError> {
            Ok(ProductDocument::create(input.clone()))
        }

        async fn update(
            &self,
            _id: &ProductId,
            _input: &ProductInput,
        ) -> Result<ProductDocument, SyncError> {
            Err(SyncError::Config("offline".into()))
        }

        async fn delete(&self, _id: &ProductId) -> Result<SuccessResponse, SyncError> {
            Err(SyncError::Config("offline".into()))
        }
    }

    fn input(name: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            price: 10.0,
            original_price: None,
            image: "x.jpg".to_string(),
            images: None,
            category: "Blouse".to_string(),
            colors: vec![],
            sizes: vec![],
            rating: Some(4.5),
            reviews: None,
            description: String::new(),
            features: vec![],
            is_new: false,
            is_sale: false,
        }
    }

    #[tokio::test]
    async fn test_confirmation_replaces_provisional_record() {
        let store = CatalogStore::new(Arc::new(CreateOnlyRemote));

        let provisional = store.add_product(input("X"));
        assert!(provisional.id.is_provisional());
        assert_eq!(provisional.rating, 4.5);
        assert_eq!(provisional.reviews, 0);

        store.settle().await;

        let products = store.products();
        assert_eq!(products.len(), 1);
        assert!(!products[0].id.is_provisional());
        assert_eq!(products[0].name, "X");
    }

    #[tokio::test]
    async fn test_confirmation_after_delete_is_dropped() {
        let store = CatalogStore::new(Arc::new(CreateOnlyRemote));

        let provisional = store.add_product(input("X"));
        store.delete_product(provisional.id);
        store.settle().await;

        assert!(store.is_empty());
    }

    #[test]
    fn test_confirm_keeps_ids_unique() {
        let store = CatalogStore::new(Arc::new(CreateOnlyRemote));
        let existing = Product::from(ProductDocument::create(input("A")));
        let provisional = Product::from_input(ProductId::Provisional(7), input("A"));
        *store.products_mut() = vec![existing.clone(), provisional];

        let mut duplicate = existing.clone();
        duplicate.name = "A (confirmed)".to_string();
        store.confirm(&ProductId::Provisional(7), duplicate);

        assert_eq!(store.products(), vec![existing]);
    }

    #[test]
    fn test_mutations_outside_runtime_stay_local() {
        let store = CatalogStore::new(Arc::new(CreateOnlyRemote));

        let provisional = store.add_product(input("X"));
        assert_eq!(store.products(), vec![provisional.clone()]);

        store.update_product(provisional.id.clone(), input("Y"));
        assert_eq!(store.get(&provisional.id).unwrap().name, "Y");

        store.delete_product(provisional.id);
        assert!(store.is_empty());
        assert!(store.inner.tasks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_seeded_products() {
        let seeded = Product::from_input(
            ProductId::Remote(DocumentId::generate().to_string()),
            input("Seed"),
        );
        let store = CatalogStore::with_products(Arc::new(CreateOnlyRemote), vec![seeded.clone()]);

        assert_eq!(store.load().await, LoadOutcome::Failed);
        assert_eq!(store.products(), vec![seeded]);
    }
}
