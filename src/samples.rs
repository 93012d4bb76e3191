//! 示例商品，用于初始化目录数据

use crate::app::catalog::model::ProductInput;

struct Sample {
    name: &'static str,
    price: f64,
    original_price: Option<f64>,
    category: &'static str,
    image: &'static str,
    colors: &'static [&'static str],
    sizes: &'static [&'static str],
    description: &'static str,
    features: &'static [&'static str],
    is_new: bool,
    is_sale: bool,
    rating: f64,
    reviews: u32,
}

const SAMPLES: &[Sample] = &[
    Sample {
        name: "Elegant Silk Blouse",
        price: 1299.0,
        original_price: Some(1599.0),
        category: "Blouse",
        image: "https://images.unsplash.com/photo-1594633312681-425c7b97ccd1?w=500",
        colors: &["Red", "Blue", "Gold"],
        sizes: &["S", "M", "L", "XL"],
        description: "Beautiful silk blouse with intricate embroidery work",
        features: &["Pure Silk", "Hand Embroidered", "Premium Quality"],
        is_new: true,
        is_sale: false,
        rating: 4.5,
        reviews: 28,
    },
    Sample {
        name: "Princess Kids Frock",
        price: 899.0,
        original_price: None,
        category: "Kids Frock",
        image: "https://images.unsplash.com/photo-1518831959646-742c3a14ebf7?w=500",
        colors: &["Pink", "Purple", "White"],
        sizes: &["2-3Y", "4-5Y", "6-7Y"],
        description: "Adorable princess-style frock for kids",
        features: &["Soft Cotton", "Comfortable Fit", "Party Wear"],
        is_new: false,
        is_sale: true,
        rating: 4.8,
        reviews: 45,
    },
    Sample {
        name: "Designer Churidhar Set",
        price: 2499.0,
        original_price: Some(2999.0),
        category: "Churidhar",
        image: "https://images.unsplash.com/photo-1610030469983-98e550d6193c?w=500",
        colors: &["Green", "Maroon", "Navy"],
        sizes: &["S", "M", "L", "XL"],
        description: "Elegant churidhar with dupatta",
        features: &["Premium Fabric", "Designer Pattern", "Complete Set"],
        is_new: true,
        is_sale: true,
        rating: 4.6,
        reviews: 32,
    },
    Sample {
        name: "Royal Boutique Gown",
        price: 3999.0,
        original_price: None,
        category: "Boutique Gown",
        image: "https://images.unsplash.com/photo-1566174053879-31528523f8ae?w=500",
        colors: &["Black", "Wine", "Royal Blue"],
        sizes: &["S", "M", "L", "XL", "XXL"],
        description: "Stunning boutique gown for special occasions",
        features: &["Designer Wear", "Premium Quality", "Party Wear"],
        is_new: true,
        is_sale: false,
        rating: 4.9,
        reviews: 67,
    },
    Sample {
        name: "Aari Work Blouse",
        price: 1799.0,
        original_price: None,
        category: "Aari Work",
        image: "https://images.unsplash.com/photo-1583391733981-5ead0c0e0b5e?w=500",
        colors: &["Gold", "Silver", "Red"],
        sizes: &["S", "M", "L"],
        description: "Exquisite aari work blouse with traditional design",
        features: &["Hand Crafted", "Traditional Aari Work", "Premium Fabric"],
        is_new: false,
        is_sale: false,
        rating: 4.7,
        reviews: 23,
    },
    Sample {
        name: "Embroidered Lehenga",
        price: 4599.0,
        original_price: Some(5499.0),
        category: "Embroidery",
        image: "https://images.unsplash.com/photo-1583391733956-6c78276477e2?w=500",
        colors: &["Pink", "Peach", "Mint Green"],
        sizes: &["S", "M", "L", "XL"],
        description: "Beautiful embroidered lehenga for weddings",
        features: &["Heavy Embroidery", "Bridal Wear", "Designer Collection"],
        is_new: true,
        is_sale: true,
        rating: 4.8,
        reviews: 89,
    },
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// 店铺的六件示例商品
pub fn sample_products() -> Vec<ProductInput> {
    SAMPLES
        .iter()
        .map(|sample| ProductInput {
            name: sample.name.to_string(),
            price: sample.price,
            original_price: sample.original_price,
            image: sample.image.to_string(),
            images: Some(vec![sample.image.to_string()]),
            category: sample.category.to_string(),
            colors: owned(sample.colors),
            sizes: owned(sample.sizes),
            rating: Some(sample.rating),
            reviews: Some(sample.reviews),
            description: sample.description.to_string(),
            features: owned(sample.features),
            is_new: sample.is_new,
            is_sale: sample.is_sale,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_samples_are_valid() {
        let samples = sample_products();
        assert_eq!(samples.len(), 6);
        for sample in &samples {
            assert!(sample.validate().is_ok(), "{} should be valid", sample.name);
        }
    }
}
