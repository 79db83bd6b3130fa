//! Search result types

use serde::{Deserialize, Serialize};

use super::PriceRange;

/// Product search hit, decorated with resolved category display names
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductHit {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub price_range: PriceRange,
    /// Display names; unresolvable references degrade to "Uncategorized"
    pub category_names: Vec<String>,
    pub image: Option<String>,
    pub in_stock: bool,
}

/// Category search hit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryHit {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
}

/// Tagged search result entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchHit {
    Product(ProductHit),
    Category(CategoryHit),
}

/// Combined search response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<SearchHit>,
    pub total: usize,
}
