//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

pub type ProductId = Thing;

/// Product type: simple (prices itself) or variable (prices through
/// variants)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    Simple,
    Variable,
}

/// Product record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_thing::option::deserialize"
    )]
    pub id: Option<ProductId>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    /// Effective only when lower than `price`
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub product_type: ProductType,
    /// Record links to categories (many-to-many membership)
    #[serde(default, deserialize_with = "serde_thing::vec::deserialize")]
    pub categories: Vec<Thing>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    pub stock: Option<i32>,
    /// Embedded variants, owned by this product
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub images: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

/// Embedded product variant (no independent lifecycle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Assigned server-side at create
    pub id: String,
    pub name: String,
    pub price: f64,
    pub discount_price: Option<f64>,
    #[serde(default = "default_true")]
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

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub product_type: Option<ProductType>,
    /// Category ids ("category:xyz" or bare)
    #[serde(default)]
    pub categories: Vec<String>,
    pub in_stock: Option<bool>,
    pub stock: Option<i32>,
    #[serde(default)]
    pub variants: Vec<VariantCreate>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Create variant payload (id assigned server-side)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantCreate {
    pub name: String,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub in_stock: Option<bool>,
    pub stock: Option<i32>,
    #[serde(default)]
    pub attributes: Vec<VariantAttribute>,
    pub image: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub discount_price: Option<f64>,
    pub product_type: Option<ProductType>,
    pub categories: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub stock: Option<i32>,
    /// Replaces the variant list wholesale
    pub variants: Option<Vec<VariantCreate>>,
    pub images: Option<Vec<String>>,
}
