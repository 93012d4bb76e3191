//! 商品展示辅助函数：分类筛选、搜索、折扣、展示编号、询价链接

use crate::app::catalog::model::Product;

/// 分类筛选中表示"全部"的选项
pub const ALL_CATEGORIES: &str = "All";

/// 筛选栏中的分类：`"All"` 加上按首次出现顺序去重后的分类
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut categories = vec![ALL_CATEGORIES.to_string()];
    for product in products {
        if !categories[1..].contains(&product.category) {
            categories.push(product.category.clone());
        }
    }
    categories
}

/// 按分类和关键字筛选商品
///
/// 缺少名称或分类的记录总是被过滤掉；关键字不区分大小写，匹配名称或分类。
pub fn filter_products<'a>(
    products: &'a [Product],
    category: &str,
    query: &str,
) -> Vec<&'a Product> {
    let query = query.to_lowercase();

    products
        .iter()
        .filter(|product| !product.name.is_empty() && !product.category.is_empty())
        .filter(|product| category == ALL_CATEGORIES || product.category == category)
        .filter(|product| {
            query.is_empty()
                || product.name.to_lowercase().contains(&query)
                || product.category.to_lowercase().contains(&query)
        })
        .collect()
}

/// 折扣百分比，四舍五入到整数（.5 向正无穷方向取整）；没有原价时为 0
pub fn discount_percentage(product: &Product) -> i64 {
    match product.original_price {
        Some(original) if original > 0.0 => {
            let percent = ((original - product.price) / original) * 100.0;
            (percent + 0.5).floor() as i64
        }
        _ => 0,
    }
}

/// 分类的展示编号前缀，未知分类为 `PRD`
fn category_prefix(category: &str) -> &'static str {
    match category {
        "Blouse" => "BLS",
        "Kids Frock" => "KFR",
        "Chudithar" => "CHU",
        "Boutique Gown" => "BGW",
        "Aari Work" => "ARI",
        "Embroidery" => "EMB",
        _ => "PRD",
    }
}

/// 新商品的展示编号：分类前缀加上该分类下的序号（现有数量 + 1，补足三位）
///
/// 只用于展示，与商品编号无关，删除后可能重复。
pub fn display_code(category: &str, products: &[Product]) -> String {
    let next = products.iter().filter(|p| p.category == category).count() + 1;
    format!("{}{:03}", category_prefix(category), next)
}

/// WhatsApp 询价链接
pub fn enquiry_link(phone: &str, product: &Product) -> String {
    let phone: String = phone.chars().filter(char::is_ascii_digit).collect();
    let message = format!(
        "Hi, I'm interested in Product ID: {} - {}",
        product.id, product.name
    );
    format!("https://wa.me/{}?text={}", phone, encode_component(&message))
}

/// 按 URI 组件规则编码：空格为 `%20`，`!'()*-._~` 和字母数字保留原样
fn encode_component(raw: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(raw.as_bytes()).collect();
    // form-urlencoded 把空格写成 `+`，字面的 `+` 已被编码为 `%2B`
    [("+", "%20"), ("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%7E", "~")]
        .iter()
        .fold(encoded, |acc, (from, to)| acc.replace(from, to))
}
