//! Category Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

pub type CategoryId = Thing;

/// Category record
///
/// `parent` is a record link to another category; None marks a root.
/// The parent graph is not validated on write; dangling references and
/// cycles are tolerated by `catalog::tree` at read time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "serde_thing::option::deserialize"
    )]
    pub id: Option<CategoryId>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Record link to the parent category
    #[serde(default, deserialize_with = "serde_thing::option::deserialize")]
    pub parent: Option<Thing>,
    pub image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    /// URL-safe unique name; generated from `name` when absent
    pub slug: Option<String>,
    pub description: Option<String>,
    /// Parent category id ("category:xyz" or bare id)
    pub parent: Option<String>,
    pub image: Option<String>,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub parent: Option<String>,
    pub image: Option<String>,
}
