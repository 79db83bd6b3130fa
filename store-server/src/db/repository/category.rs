//! Category Repository

use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::utils::slugify;

const TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all categories in natural record order
    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT * FROM category")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        // Extract pure id if it contains table prefix (e.g., "category:xxx" -> "xxx")
        let pure_id = strip_table_prefix(TABLE, id);
        let category: Option<Category> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(category)
    }

    /// Find category by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Category>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM category WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let categories: Vec<Category> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category
    ///
    /// 父引用不做存在性校验，悬空引用由分类树构建容错处理。
    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        let slug = data.slug.unwrap_or_else(|| slugify(&data.name));
        if slug.is_empty() {
            return Err(RepoError::Validation("slug cannot be empty".to_string()));
        }

        // Check duplicate slug
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category slug '{}' already exists",
                slug
            )));
        }

        let now = Utc::now();
        let category = Category {
            id: None,
            name: data.name,
            slug,
            description: data.description,
            parent: data.parent.as_deref().map(|id| make_thing(TABLE, id)),
            image: data.image,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Category> = self.base.db().create(TABLE).content(category).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        // Check duplicate slug if changing
        if let Some(ref new_slug) = data.slug
            && new_slug != &existing.slug
            && self.find_by_slug(new_slug).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Category slug '{}' already exists",
                new_slug
            )));
        }

        #[derive(Serialize)]
        struct CategoryUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            parent: Option<Thing>,
            #[serde(skip_serializing_if = "Option::is_none")]
            image: Option<String>,
            updated_at: chrono::DateTime<Utc>,
        }

        let update_data = CategoryUpdateDb {
            name: data.name,
            slug: data.slug,
            description: data.description,
            parent: data.parent.as_deref().map(|p| make_thing(TABLE, p)),
            image: data.image,
            updated_at: Utc::now(),
        };

        // Extract pure id if it contains table prefix
        let pure_id = strip_table_prefix(TABLE, id);

        // Update using raw query to avoid deserialization issues with null fields
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", update_data))
            .await?;

        // Fetch the updated record
        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete a category
    ///
    /// Refused while products still reference the category. Deleting a
    /// parent category is allowed; orphaned children are promoted to root
    /// on the next tree build.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let pure_id = strip_table_prefix(TABLE, id);

        // Check if products still reference this category
        let cat_thing = make_thing(TABLE, pure_id);
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM product WHERE categories CONTAINS $cat GROUP ALL")
            .bind(("cat", cat_thing))
            .await?;
        let count: Option<i64> = result.take((0, "count"))?;

        if count.unwrap_or(0) > 0 {
            return Err(RepoError::Validation(
                "Cannot delete category with products".to_string(),
            ));
        }

        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;

        Ok(true)
    }
}
