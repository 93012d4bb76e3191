//! 添加商品表单
//!
//! 表单字段保持用户输入的原始字符串，[`ProductForm::parse`] 和
//! [`QuickAddForm::parse`] 负责转换为 [`ProductInput`]；校验失败时返回
//! 可直接展示给用户的提示并阻止提交。

use crate::app::catalog::model::ProductInput;

/// 未填写分类时使用的默认分类
pub const DEFAULT_CATEGORY: &str = "New Arrivals";

/// 快速添加时补齐的默认值
pub const QUICK_ADD_COLOR: &str = "#64748B";
pub const QUICK_ADD_SIZE: &str = "One Size";
pub const QUICK_ADD_DESCRIPTION: &str = "New product";
pub const QUICK_ADD_FEATURE: &str = "Handcrafted";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please enter a product name.")]
    MissingName,
    #[error("Please provide a product image.")]
    MissingImage,
    #[error("Please enter a product description.")]
    MissingDescription,
    #[error("Please choose a category.")]
    MissingCategory,
    #[error("Please provide a valid price for the product.")]
    InvalidPrice,
    #[error("Please provide a valid original price for the product.")]
    InvalidOriginalPrice,
    #[error("Rating must be between 0 and 5.")]
    InvalidRating,
    #[error("Reviews must be a whole number.")]
    InvalidReviews,
}

/// 表单原始输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    pub image: String,
    pub price: String,
    pub original_price: String,
    pub category: String,
    /// 逗号分隔
    pub colors: String,
    /// 逗号分隔，统一转为大写
    pub sizes: String,
    pub description: String,
    /// 每行一个卖点
    pub features: String,
    pub rating: String,
    pub reviews: String,
    pub is_new: bool,
    pub is_sale: bool,
}

impl ProductForm {
    pub fn parse(&self) -> Result<ProductInput, FormError> {
        let name = required(&self.name, FormError::MissingName)?;
        let image = required(&self.image, FormError::MissingImage)?;
        let price = positive_price(&self.price).ok_or(FormError::InvalidPrice)?;

        let original_price = if self.original_price.trim().is_empty() {
            None
        } else {
            Some(positive_price(&self.original_price).ok_or(FormError::InvalidOriginalPrice)?)
        };

        let rating = match self.rating.trim() {
            "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .ok()
                    .filter(|rating| (0.0..=5.0).contains(rating))
                    .ok_or(FormError::InvalidRating)?,
            ),
        };

        let reviews = match self.reviews.trim() {
            "" => None,
            raw => Some(raw.parse::<u32>().map_err(|_| FormError::InvalidReviews)?),
        };

        let category = match self.category.trim() {
            "" => DEFAULT_CATEGORY.to_string(),
            category => category.to_string(),
        };
        let description = required(&self.description, FormError::MissingDescription)?;

        Ok(ProductInput {
            name,
            price,
            original_price,
            image,
            images: None,
            category,
            colors: split_list(&self.colors, ',').collect(),
            sizes: split_list(&self.sizes, ',')
                .map(|size| size.to_uppercase())
                .collect(),
            rating,
            reviews,
            description,
            features: split_list(&self.features, '\n').collect(),
            is_new: self.is_new,
            is_sale: self.is_sale,
        })
    }
}

/// 快速添加表单：只填名称、价格、分类、描述和图片，其余字段取默认值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickAddForm {
    pub name: String,
    pub price: String,
    pub category: String,
    pub description: String,
    pub image: String,
}

impl QuickAddForm {
    pub fn parse(&self) -> Result<ProductInput, FormError> {
        let name = required(&self.name, FormError::MissingName)?;
        let category = required(&self.category, FormError::MissingCategory)?;
        let image = required(&self.image, FormError::MissingImage)?;
        let price = positive_price(&self.price).ok_or(FormError::InvalidPrice)?;

        let description = match self.description.trim() {
            "" => QUICK_ADD_DESCRIPTION.to_string(),
            description => description.to_string(),
        };

        Ok(ProductInput {
            name,
            price,
            original_price: None,
            image,
            images: None,
            category,
            colors: vec![QUICK_ADD_COLOR.to_string()],
            sizes: vec![QUICK_ADD_SIZE.to_string()],
            rating: None,
            reviews: None,
            description,
            features: vec![QUICK_ADD_FEATURE.to_string()],
            is_new: true,
            is_sale: false,
        })
    }
}

fn required(raw: &str, missing: FormError) -> Result<String, FormError> {
    match raw.trim() {
        "" => Err(missing),
        value => Ok(value.to_string()),
    }
}

fn positive_price(raw: &str) -> Option<f64> {
    parse_price(raw).filter(|price| *price > 0.0)
}

/// 去掉数字和小数点以外的字符后解析，例如 `"₹1,299"` -> `1299.0`
///
/// 与浏览器的 `parseFloat` 一致，只取最长的合法前缀（`"1.2.3"` -> `1.2`）。
fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut seen_dot = false;
    let prefix: String = cleaned
        .chars()
        .take_while(|c| {
            if *c == '.' {
                if seen_dot {
                    return false;
                }
                seen_dot = true;
            }
            true
        })
        .collect();

    prefix.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn split_list(raw: &str, separator: char) -> impl Iterator<Item = String> + '_ {
    raw.split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn form() -> ProductForm {
        ProductForm {
            name: "  Aari Work Blouse ".to_string(),
            image: "https://example.com/aari.jpg".to_string(),
            price: "₹1,799".to_string(),
            colors: "Gold, Silver,, Red ".to_string(),
            sizes: "s, m,l".to_string(),
            description: "Exquisite aari work blouse".to_string(),
            features: "Hand Crafted\n\n Traditional Aari Work \nPremium Fabric".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_splits_and_normalises_lists() {
        let input = form().parse().unwrap();
        assert_eq!(input.name, "Aari Work Blouse");
        assert_eq!(input.price, 1799.0);
        assert_eq!(input.colors, vec!["Gold", "Silver", "Red"]);
        assert_eq!(input.sizes, vec!["S", "M", "L"]);
        assert_eq!(
            input.features,
            vec!["Hand Crafted", "Traditional Aari Work", "Premium Fabric"]
        );
        assert_eq!(input.category, DEFAULT_CATEGORY);
        assert_eq!(input.rating, None);
        assert_eq!(input.reviews, None);
    }

    #[test]
    fn test_invalid_price_blocks_submission() {
        for price in ["", "abc", "0", "-"] {
            let mut f = form();
            f.price = price.to_string();
            assert_eq!(f.parse(), Err(FormError::InvalidPrice), "price {:?}", price);
        }
    }

    #[test]
    fn test_required_fields_block_submission() {
        let mut f = form();
        f.name = "   ".to_string();
        assert_eq!(f.parse(), Err(FormError::MissingName));

        let mut f = form();
        f.image = String::new();
        assert_eq!(f.parse(), Err(FormError::MissingImage));

        let mut f = form();
        f.description = "\n ".to_string();
        assert_eq!(f.parse(), Err(FormError::MissingDescription));
    }

    #[test]
    fn test_zero_original_price_is_rejected() {
        for original_price in ["0", "₹0.00", "n/a"] {
            let mut f = form();
            f.original_price = original_price.to_string();
            assert_eq!(
                f.parse(),
                Err(FormError::InvalidOriginalPrice),
                "original price {:?}",
                original_price
            );
        }
    }

    #[test]
    fn test_parsed_form_passes_service_validation() {
        let mut f = form();
        f.original_price = "2,199".to_string();
        f.rating = "5".to_string();
        assert!(f.parse().unwrap().validate().is_ok());
    }

    fn quick_form() -> QuickAddForm {
        QuickAddForm {
            name: " Silk Saree ".to_string(),
            price: "2499".to_string(),
            category: "Embroidery".to_string(),
            description: String::new(),
            image: "data:image/png;base64,AAAA".to_string(),
        }
    }

    #[test]
    fn test_quick_add_fills_defaults() {
        let input = quick_form().parse().unwrap();
        assert_eq!(input.name, "Silk Saree");
        assert_eq!(input.price, 2499.0);
        assert_eq!(input.category, "Embroidery");
        assert_eq!(input.colors, vec![QUICK_ADD_COLOR]);
        assert_eq!(input.sizes, vec![QUICK_ADD_SIZE]);
        assert_eq!(input.description, QUICK_ADD_DESCRIPTION);
        assert_eq!(input.features, vec![QUICK_ADD_FEATURE]);
        assert!(input.is_new);
        assert!(!input.is_sale);
        assert!(input.validate().is_ok());

        let mut f = quick_form();
        f.description = "Hand woven".to_string();
        assert_eq!(f.parse().unwrap().description, "Hand woven");
    }

    #[test]
    fn test_quick_add_required_fields() {
        let mut f = quick_form();
        f.name = String::new();
        assert_eq!(f.parse(), Err(FormError::MissingName));

        let mut f = quick_form();
        f.category = " ".to_string();
        assert_eq!(f.parse(), Err(FormError::MissingCategory));

        let mut f = quick_form();
        f.image = String::new();
        assert_eq!(f.parse(), Err(FormError::MissingImage));

        let mut f = quick_form();
        f.price = "0".to_string();
        assert_eq!(f.parse(), Err(FormError::InvalidPrice));
    }

    #[test]
    fn test_price_takes_longest_numeric_prefix() {
        assert_eq!(parse_price("1.2.3"), Some(1.2));
        assert_eq!(parse_price("499.50 INR"), Some(499.5));
    }

    #[test]
    fn test_rating_range() {
        let mut f = form();
        f.rating = "4.5".to_string();
        assert_eq!(f.parse().unwrap().rating, Some(4.5));

        f.rating = "5.1".to_string();
        assert_eq!(f.parse(), Err(FormError::InvalidRating));

        f.rating = "great".to_string();
        assert_eq!(f.parse(), Err(FormError::InvalidRating));
    }

    #[test]
    fn test_reviews_and_original_price() {
        let mut f = form();
        f.reviews = "28".to_string();
        f.original_price = "2,199".to_string();
        let input = f.parse().unwrap();
        assert_eq!(input.reviews, Some(28));
        assert_eq!(input.original_price, Some(2199.0));

        f.reviews = "many".to_string();
        assert_eq!(f.parse(), Err(FormError::InvalidReviews));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FormError::InvalidPrice.to_string(),
            "Please provide a valid price for the product."
        );
        assert_eq!(FormError::InvalidRating.to_string(), "Rating must be between 0 and 5.");
    }
}
