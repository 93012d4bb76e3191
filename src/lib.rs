//! # 精品服装店商品目录
//!
//! 这个库包含商品目录的服务端和客户端两部分：
//! - `app`：基于 Axum 的目录服务（`/products` 的增删改查）和文档存储
//! - `client`：访问目录服务的 HTTP 客户端
//! - `store`：客户端商品仓库，乐观更新本地集合并异步同步到目录服务
//! - `forms`、`view`：添加商品表单解析和商品展示辅助函数

pub mod app;
pub mod client;
pub mod config;
pub mod core;
pub mod forms;
pub mod infrastructure;
pub mod samples;
pub mod store;
pub mod view;

pub use app::catalog::model::{DocumentId, Product, ProductDocument, ProductId, ProductInput};
pub use client::{CatalogRemote, HttpCatalogClient, SyncError};
pub use config::Config;
pub use crate::core::error::CoreError;
pub use store::{CatalogStore, LoadOutcome};
