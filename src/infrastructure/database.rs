//! 数据库基础设施
//!
//! 商品以 JSONB 文档的形式存放在 PostgreSQL 的 `products` 表中，
//! `id` 列保存文档的 `_id`，`created_at` 用于保持列表顺序。

use async_trait::async_trait;
use sqlx::{
    postgres::{PgPool, PgPoolOptions},
    types::Json,
    Error,
};
use std::time::Duration;
use tracing::info;

use crate::app::catalog::model::{DocumentId, ProductDocument, ProductInput, ProductPatch};
use crate::app::catalog::repository::ProductRepository;
use crate::config::DatabaseConfig;
use crate::core::error::CoreError;

pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, Error> {
        info!(
            "Connecting to database: {}",
            redact_password(&config.url)
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.url)
            .await?;

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// 创建表（在实际应用中应该使用迁移）
    pub async fn ensure_schema(&self) -> Result<(), Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                doc JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Database schema ready");
        Ok(())
    }

    pub fn product_repository(&self) -> PgProductRepository {
        PgProductRepository {
            pool: self.pool.clone(),
        }
    }
}

/// 隐藏连接串中的密码
fn redact_password(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) if parsed.password().is_some() => {
            let _ = parsed.set_password(Some("***"));
            parsed.to_string()
        }
        _ => url.to_string(),
    }
}

/// PostgreSQL JSONB 文档存储
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn list(&self) -> Result<Vec<ProductDocument>, CoreError> {
        let rows: Vec<(Json<ProductDocument>,)> =
            sqlx::query_as("SELECT doc FROM products ORDER BY created_at, id")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(doc,)| doc.0).collect())
    }

    async fn create(&self, input: ProductInput) -> Result<ProductDocument, CoreError> {
        let doc = ProductDocument::create(input);

        sqlx::query("INSERT INTO products (id, doc, created_at) VALUES ($1, $2, $3)")
            .bind(doc.id.as_str())
            .bind(Json(&doc))
            .bind(doc.created_at)
            .execute(&self.pool)
            .await?;

        Ok(doc)
    }

    async fn update(
        &self,
        id: &DocumentId,
        patch: ProductPatch,
    ) -> Result<Option<ProductDocument>, CoreError> {
        // 使用事务，读-改-写之间锁住该行
        let mut tx = self.pool.begin().await?;

        let row: Option<(Json<ProductDocument>,)> =
            sqlx::query_as("SELECT doc FROM products WHERE id = $1 FOR UPDATE")
                .bind(id.as_str())
                .fetch_optional(&mut *tx)
                .await?;

        let Some((Json(mut doc),)) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        doc.apply(patch);

        sqlx::query("UPDATE products SET doc = $1 WHERE id = $2")
            .bind(Json(&doc))
            .bind(id.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(doc))
    }

    async fn delete(&self, id: &DocumentId) -> Result<bool, CoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<u64, CoreError> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn insert_many(
        &self,
        inputs: Vec<ProductInput>,
    ) -> Result<Vec<ProductDocument>, CoreError> {
        // 使用事务批量创建
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());

        for input in inputs {
            let doc = ProductDocument::create(input);
            sqlx::query("INSERT INTO products (id, doc, created_at) VALUES ($1, $2, $3)")
                .bind(doc.id.as_str())
                .bind(Json(&doc))
                .bind(doc.created_at)
                .execute(&mut *tx)
                .await?;
            created.push(doc);
        }

        tx.commit().await?;
        Ok(created)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
