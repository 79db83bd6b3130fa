//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Option<String>,
    pub name: String,
    /// URL-safe unique name
    pub slug: String,
    pub description: Option<String>,
    /// Parent category reference ("category:xyz"); None marks a root
    pub parent: Option<String>,
    pub image: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Category tree node
///
/// A category annotated with its computed product membership count and
/// nested children. Built per request, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: u32,
    pub children: Vec<CategoryNode>,
}
