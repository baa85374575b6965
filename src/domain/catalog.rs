//! Product catalog: items, variants, and the static sample data.
//!
//! The catalog is defined as static configuration and immutable for the
//! process lifetime. Construction validates the two structural invariants:
//! product ids are unique, and every product carries at least one variant.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::value_objects::Money;
use crate::i18n::{Lang, LocalizedText};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Fruity,
    Dessert,
    Menthol,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    #[serde(rename = "3%")]
    Three,
    #[serde(rename = "5%")]
    Five,
}

impl Strength {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Three => "3%",
            Strength::Five => "5%",
        }
    }
}

/// Promotional badge shown on a product card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Badge {
    Best,
    Popular,
    New,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub name: LocalizedText,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: LocalizedText,
    pub description: LocalizedText,
    pub price: Money,
    pub image: String,
    pub variants: Vec<Variant>,
    pub category: Category,
    pub strength: Strength,
    pub rating: Decimal,
    pub reviews: u32,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<Badge>,
}

impl Product {
    pub fn name_in(&self, lang: Lang) -> &str {
        self.name.resolve(lang)
    }

    pub fn description_in(&self, lang: Lang) -> &str {
        self.description.resolve(lang)
    }

    pub fn variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Display name of a variant, empty when the id is unknown.
    pub fn variant_name_in(&self, variant_id: &str, lang: Lang) -> &str {
        self.variant(variant_id).map(|v| v.name.resolve(lang)).unwrap_or("")
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        for product in &products {
            if !ids.insert(product.id.as_str()) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
            if product.variants.is_empty() {
                return Err(CatalogError::NoVariants(product.id.clone()));
            }
            let mut variant_ids = HashSet::new();
            for variant in &product.variants {
                if !variant_ids.insert(variant.id.as_str()) {
                    return Err(CatalogError::DuplicateVariant {
                        product: product.id.clone(),
                        variant: variant.id.clone(),
                    });
                }
            }
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn require(&self, id: &str) -> crate::Result<&Product> {
        self.get(id).ok_or_else(|| crate::StorefrontError::ProductNotFound(id.to_string()))
    }

    /// Case-insensitive substring search over localized name and description.
    /// A blank query returns the whole catalog.
    pub fn search(&self, query: &str, lang: Lang) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name_in(lang).to_lowercase().contains(&needle)
                    || p.description_in(lang).to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// The storefront's static product list.
    pub fn sample() -> Self {
        let products = vec![
            Product {
                id: "p1".into(),
                name: LocalizedText::new("Blueberry Raspberry")
                    .en("Blueberry Raspberry")
                    .zh("蓝莓树莓"),
                description: LocalizedText::new("蓝莓×树莓，冷感清爽，回甜干净。")
                    .en("Blueberry × Raspberry, crisp-cool with a clean sweet finish.")
                    .zh("蓝莓×树莓，冷感清爽，回甜干净。"),
                price: Money::aud(Decimal::new(129, 1)),
                image: "https://images.unsplash.com/photo-1536599018102-9f803c140fc1".into(),
                variants: standard_variants(),
                category: Category::Fruity,
                strength: Strength::Three,
                rating: Decimal::new(46, 1),
                reviews: 214,
                created_at: ts(1_730_200_000_000),
                badge: Some(Badge::Best),
            },
            Product {
                id: "p2".into(),
                name: LocalizedText::new("Niagara Grape")
                    .en("Niagara Grape")
                    .zh("尼亚加拉白葡萄"),
                description: LocalizedText::new("尼亚加拉白葡萄，清脆香气与冷调平衡。")
                    .en("Niagara white grape, crisp aroma balanced with coolness.")
                    .zh("尼亚加拉白葡萄，清脆香气与冷调平衡。"),
                price: Money::aud(Decimal::new(129, 1)),
                image: "https://images.unsplash.com/photo-1567171670060-2913f6b9c089".into(),
                variants: standard_variants(),
                category: Category::Fruity,
                strength: Strength::Five,
                rating: Decimal::new(47, 1),
                reviews: 331,
                created_at: ts(1_731_600_000_000),
                badge: Some(Badge::Popular),
            },
            Product {
                id: "p3".into(),
                name: LocalizedText::new("Melon Yogurt Ice")
                    .en("Melon Yogurt Ice")
                    .zh("哈密瓜酸奶冰"),
                description: LocalizedText::new("哈密瓜×酸奶，绵密顺滑，冰爽收口。")
                    .en("Hami melon × yogurt, creamy and smooth with an icy finish.")
                    .zh("哈密瓜×酸奶，绵密顺滑，冰爽收口。"),
                price: Money::aud(Decimal::new(129, 1)),
                image: "https://images.unsplash.com/photo-1541789660-6b2c5a4ab04b".into(),
                variants: standard_variants(),
                category: Category::Dessert,
                strength: Strength::Three,
                rating: Decimal::new(44, 1),
                reviews: 97,
                created_at: ts(1_732_400_000_000),
                badge: Some(Badge::New),
            },
            Product {
                id: "p4".into(),
                name: LocalizedText::new("Citrus Fizz").en("Citrus Fizz").zh("柑橘汽水"),
                description: LocalizedText::new("柑橘汽水，清爽微酸带气泡感。")
                    .en("Citrus soda, refreshing and lightly tart with effervescence.")
                    .zh("柑橘汽水，清爽微酸带气泡感。"),
                price: Money::aud(Decimal::new(119, 1)),
                image: "https://images.unsplash.com/photo-1541976076758-347942db1970".into(),
                variants: standard_variants(),
                category: Category::Fruity,
                strength: Strength::Three,
                rating: Decimal::new(42, 1),
                reviews: 61,
                created_at: ts(1_729_000_000_000),
                badge: None,
            },
            Product {
                id: "p5".into(),
                name: LocalizedText::new("Rainbow Candy").en("Rainbow Candy").zh("彩虹软糖"),
                description: LocalizedText::new("彩虹软糖，多层果味甜感，童年回忆。")
                    .en("Rainbow candy, layered fruity sweetness, nostalgic.")
                    .zh("彩虹软糖，多层果味甜感，童年回忆。"),
                price: Money::aud(Decimal::new(135, 1)),
                image: "https://images.unsplash.com/photo-1519681393784-d120267933ba".into(),
                variants: standard_variants(),
                category: Category::Dessert,
                strength: Strength::Five,
                rating: Decimal::new(48, 1),
                reviews: 512,
                created_at: ts(1_733_000_000_000),
                badge: Some(Badge::Best),
            },
            Product {
                id: "p6".into(),
                name: LocalizedText::new("Mint Breeze").en("Mint Breeze").zh("薄荷微风"),
                description: LocalizedText::new("薄荷清凉，干净利落。")
                    .en("Mint freshness that is clean and brisk.")
                    .zh("薄荷清凉，干净利落。"),
                price: Money::aud(Decimal::new(109, 1)),
                image: "https://images.unsplash.com/photo-1510626176961-4b57d4fbad03".into(),
                variants: standard_variants(),
                category: Category::Menthol,
                strength: Strength::Three,
                rating: Decimal::new(41, 1),
                reviews: 44,
                created_at: ts(1_727_000_000_000),
                badge: None,
            },
        ];
        // The static data upholds the invariants by construction.
        Self::new(products).unwrap_or(Self { products: vec![] })
    }
}

fn standard_variants() -> Vec<Variant> {
    vec![
        Variant {
            id: "v1".into(),
            name: LocalizedText::new("30ml / 3%").en("30 ml / 3%").zh("30毫升 / 3%"),
        },
        Variant {
            id: "v2".into(),
            name: LocalizedText::new("30ml / 5%").en("30 ml / 5%").zh("30毫升 / 5%"),
        },
    ]
}

fn ts(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::UNIX_EPOCH)
}

#[derive(Debug, Clone)]
pub enum CatalogError {
    DuplicateProduct(String),
    NoVariants(String),
    DuplicateVariant { product: String, variant: String },
}
impl std::error::Error for CatalogError {}
impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateProduct(id) => write!(f, "Duplicate product id: {id}"),
            Self::NoVariants(id) => write!(f, "Product {id} has no variants"),
            Self::DuplicateVariant { product, variant } => {
                write!(f, "Duplicate variant id {variant} in product {product}")
            }
        }
    }
}
