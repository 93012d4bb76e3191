//! 商品数据模型
//!
//! - [`Product`]：客户端持有的商品记录，`id` 可能是临时编号或服务端 `_id`
//! - [`ProductDocument`]：目录服务存储的商品文档
//! - [`ProductInput`]：创建/更新时提交的商品字段
//! - [`ProductPatch`]：`PUT /products` 中按字段覆盖的部分文档

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::CoreError;

/// 客户端商品标识
///
/// 创建时先分配基于时间戳的临时数字编号，服务端确认后替换为服务端分配的 `_id`。
/// JSON 中直接表示为数字或字符串。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Provisional(u64),
    Remote(String),
}

impl ProductId {
    pub fn is_provisional(&self) -> bool {
        matches!(self, ProductId::Provisional(_))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Provisional(n) => write!(f, "{}", n),
            ProductId::Remote(s) => f.write_str(s),
        }
    }
}

impl From<DocumentId> for ProductId {
    fn from(id: DocumentId) -> Self {
        ProductId::Remote(id.0)
    }
}

/// 服务端文档标识：24 位小写十六进制（4 字节秒级时间戳 + 8 字节随机数）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub const LEN: usize = 24;

    /// 生成新的文档标识
    pub fn generate() -> Self {
        let seconds = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let random = Uuid::new_v4();
        let mut hex = format!("{:08x}", seconds);
        for byte in &random.as_bytes()[..8] {
            hex.push_str(&format!("{:02x}", byte));
        }
        Self(hex)
    }

    /// 解析外部传入的标识，格式不正确时返回 `BadRequest`
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let raw = raw.trim();
        if raw.len() == Self::LEN && raw.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(CoreError::BadRequest(format!("无效的商品 ID: {}", raw)))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&ProductId> for DocumentId {
    type Error = CoreError;

    fn try_from(id: &ProductId) -> Result<Self, Self::Error> {
        match id {
            ProductId::Remote(raw) => DocumentId::parse(raw),
            ProductId::Provisional(n) => Err(CoreError::BadRequest(format!(
                "商品 {} 尚未在服务端创建",
                n
            ))),
        }
    }
}

/// 客户端商品记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    pub category: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_sale: bool,
}

impl Product {
    /// 由提交的字段构造记录，缺省的评分和评论数置 0
    pub fn from_input(id: ProductId, input: ProductInput) -> Self {
        Self {
            id,
            name: input.name,
            price: input.price,
            original_price: input.original_price,
            image: input.image,
            images: input.images,
            category: input.category,
            colors: input.colors,
            sizes: input.sizes,
            rating: input.rating.unwrap_or(0.0),
            reviews: input.reviews.unwrap_or(0),
            description: input.description,
            features: input.features,
            is_new: input.is_new,
            is_sale: input.is_sale,
        }
    }

    /// 展示用图片列表；没有附加图片时退回主图
    pub fn display_images(&self) -> Vec<&str> {
        match &self.images {
            Some(images) if !images.is_empty() => images.iter().map(String::as_str).collect(),
            _ => vec![self.image.as_str()],
        }
    }
}

impl From<ProductDocument> for Product {
    fn from(doc: ProductDocument) -> Self {
        Self {
            id: doc.id.into(),
            name: doc.name,
            price: doc.price,
            original_price: doc.original_price,
            image: doc.image,
            images: Some(doc.images),
            category: doc.category,
            colors: doc.colors,
            sizes: doc.sizes,
            rating: doc.rating,
            reviews: doc.reviews,
            description: doc.description,
            features: doc.features,
            is_new: doc.is_new,
            is_sale: doc.is_sale,
        }
    }
}

/// 创建或整体更新商品时提交的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(length(min = 1, message = "商品名称不能为空"))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, message = "价格必须大于 0"))]
    pub price: f64,
    #[validate(range(exclusive_min = 0.0, message = "原价必须大于 0"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    #[validate(length(min = 1, message = "商品主图不能为空"))]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[validate(length(min = 1, message = "商品分类不能为空"))]
    pub category: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "评分必须在 0 到 5 之间"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_sale: bool,
}

/// 按字段覆盖的部分文档，未提供的字段保留原值
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[validate(length(min = 1, message = "商品名称不能为空"))]
    pub name: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "价格必须大于 0"))]
    pub price: Option<f64>,
    #[validate(range(exclusive_min = 0.0, message = "原价必须大于 0"))]
    pub original_price: Option<f64>,
    #[validate(length(min = 1, message = "商品主图不能为空"))]
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    #[validate(length(min = 1, message = "商品分类不能为空"))]
    pub category: Option<String>,
    pub colors: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    #[validate(range(min = 0.0, max = 5.0, message = "评分必须在 0 到 5 之间"))]
    pub rating: Option<f64>,
    pub reviews: Option<u32>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    pub is_new: Option<bool>,
    pub is_sale: Option<bool>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// `PUT /products` 请求体：`{id, ...fields}`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProductRequest {
    pub id: ProductId,
    #[serde(flatten)]
    pub patch: ProductPatch,
}

/// 客户端发送的更新请求体，与 [`UpdateProductRequest`] 对应
#[derive(Debug, Serialize)]
pub struct UpdateProductBody<'a> {
    pub id: &'a ProductId,
    #[serde(flatten)]
    pub input: &'a ProductInput,
}

/// 目录服务存储的商品文档
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub category: String,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_sale: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductDocument {
    /// 以新生成的 `_id` 创建文档，并补齐默认值
    pub fn create(input: ProductInput) -> Self {
        let now = Utc::now();
        Self {
            id: DocumentId::generate(),
            name: input.name,
            price: input.price,
            original_price: input.original_price,
            image: input.image,
            images: input.images.unwrap_or_default(),
            category: input.category,
            colors: input.colors,
            sizes: input.sizes,
            rating: input.rating.unwrap_or(0.0),
            reviews: input.reviews.unwrap_or(0),
            description: input.description,
            features: input.features,
            is_new: input.is_new,
            is_sale: input.is_sale,
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// 用补丁中提供的字段覆盖文档
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(original_price) = patch.original_price {
            self.original_price = Some(original_price);
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
        if let Some(images) = patch.images {
            self.images = images;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
        if let Some(sizes) = patch.sizes {
            self.sizes = sizes;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(reviews) = patch.reviews {
            self.reviews = reviews;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(features) = patch.features {
            self.features = features;
        }
        if let Some(is_new) = patch.is_new {
            self.is_new = is_new;
        }
        if let Some(is_sale) = patch.is_sale {
            self.is_sale = is_sale;
        }
        self.updated_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_input() -> ProductInput {
        ProductInput {
            name: "Elegant Silk Blouse".to_string(),
            price: 1299.0,
            original_price: Some(1599.0),
            image: "https://example.com/blouse.jpg".to_string(),
            images: None,
            category: "Blouse".to_string(),
            colors: vec!["Red".to_string()],
            sizes: vec!["M".to_string()],
            rating: None,
            reviews: None,
            description: String::new(),
            features: vec![],
            is_new: true,
            is_sale: false,
        }
    }

    #[test]
    fn test_document_id_shape() {
        let id = DocumentId::generate();
        assert_eq!(id.as_str().len(), DocumentId::LEN);
        assert!(DocumentId::parse(id.as_str()).is_ok());
        assert_ne!(id, DocumentId::generate());

        assert!(DocumentId::parse("not-an-id").is_err());
        assert!(DocumentId::parse("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
    }

    #[test]
    fn test_product_id_json_forms() {
        let provisional: ProductId = serde_json::from_value(json!(1712345678901u64)).unwrap();
        assert_eq!(provisional, ProductId::Provisional(1712345678901));

        let remote: ProductId = serde_json::from_value(json!("a")).unwrap();
        assert_eq!(remote, ProductId::Remote("a".to_string()));
        assert_eq!(remote.to_string(), "a");
    }

    #[test]
    fn test_from_input_defaults_rating_and_reviews() {
        let product = Product::from_input(ProductId::Provisional(1), sample_input());
        assert_eq!(product.rating, 0.0);
        assert_eq!(product.reviews, 0);
    }

    #[test]
    fn test_display_images_falls_back_to_primary_image() {
        let mut product = Product::from_input(ProductId::Provisional(1), sample_input());
        assert_eq!(product.display_images(), vec!["https://example.com/blouse.jpg"]);

        product.images = Some(vec![]);
        assert_eq!(product.display_images(), vec!["https://example.com/blouse.jpg"]);

        product.images = Some(vec!["a.jpg".to_string(), "b.jpg".to_string()]);
        assert_eq!(product.display_images(), vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_input_validation() {
        assert!(sample_input().validate().is_ok());

        let mut input = sample_input();
        input.price = 0.0;
        assert!(input.validate().is_err());

        let mut input = sample_input();
        input.rating = Some(5.5);
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_document_create_and_apply() {
        let mut doc = ProductDocument::create(sample_input());
        assert_eq!(doc.rating, 0.0);
        assert!(doc.images.is_empty());

        doc.apply(ProductPatch {
            price: Some(999.0),
            is_sale: Some(true),
            ..Default::default()
        });
        assert_eq!(doc.price, 999.0);
        assert!(doc.is_sale);
        assert_eq!(doc.name, "Elegant Silk Blouse");
    }

    #[test]
    fn test_update_request_body_shape() {
        let id = ProductId::Remote("abc".to_string());
        let input = sample_input();
        let body = serde_json::to_value(UpdateProductBody { id: &id, input: &input }).unwrap();
        assert_eq!(body["id"], "abc");
        assert_eq!(body["isNew"], true);
        assert!(body.get("rating").is_none());

        let parsed: UpdateProductRequest = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.id, id);
        assert_eq!(parsed.patch.price, Some(1299.0));
        assert_eq!(parsed.patch.rating, None);
    }
}
