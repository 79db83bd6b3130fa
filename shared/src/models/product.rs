//! Product Model

use serde::{Deserialize, Serialize};

/// Product type: simple products price themselves, variable products
/// price through their variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Simple,
    Variable,
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Option<String>,
    pub name: String,
    /// URL-safe unique name
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Effective only when lower than `price`
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub product_type: ProductType,
    /// Category references ("category:xyz"), many-to-many
    #[serde(default)]
    pub categories: Vec<String>,
    pub in_stock: bool,
    pub stock: Option<i32>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Product variant - a purchasable sub-configuration with its own price
/// and stock. Owned by its parent product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub in_stock: bool,
    pub stock: Option<i32>,
    #[serde(default)]
    pub attributes: Vec<VariantAttribute>,
    pub image: Option<String>,
}

/// Variant attribute pair (e.g. color/size)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub name: String,
    pub value: String,
}

/// Effective min/max price across a product's purchase options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}
