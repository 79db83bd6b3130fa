//! Product Repository

use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;

use super::{BaseRepository, RepoError, RepoResult, make_thing, strip_table_prefix};
use crate::db::models::{Product, ProductCreate, ProductUpdate, ProductVariant, VariantCreate};
use crate::utils::slugify;

const TABLE: &str = "product";
const CATEGORY_TABLE: &str = "category";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products in natural record order
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Capped unfiltered snapshot (listing endpoint, no pagination cursor)
    pub async fn find_all_capped(&self, limit: usize) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product LIMIT $limit")
            .bind(("limit", limit as i64))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find products that list the given category
    pub async fn find_by_category(&self, category_id: &str) -> RepoResult<Vec<Product>> {
        let cat_thing = make_thing(CATEGORY_TABLE, category_id);
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE categories CONTAINS $cat")
            .bind(("cat", cat_thing))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let product: Option<Product> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(product)
    }

    /// Find product by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Product>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.price < 0.0 {
            return Err(RepoError::Validation("price cannot be negative".to_string()));
        }

        let slug = data.slug.unwrap_or_else(|| slugify(&data.name));
        if slug.is_empty() {
            return Err(RepoError::Validation("slug cannot be empty".to_string()));
        }

        // Check duplicate slug
        if self.find_by_slug(&slug).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Product slug '{}' already exists",
                slug
            )));
        }

        let categories: Vec<Thing> = data
            .categories
            .iter()
            .map(|id| make_thing(CATEGORY_TABLE, id))
            .collect();

        let now = Utc::now();
        let product = Product {
            id: None,
            name: data.name,
            slug,
            description: data.description.unwrap_or_default(),
            price: data.price,
            discount_price: data.discount_price,
            product_type: data.product_type.unwrap_or_default(),
            categories,
            in_stock: data.in_stock.unwrap_or(true),
            stock: data.stock,
            variants: materialize_variants(data.variants),
            images: data.images,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Product> = self.base.db().create(TABLE).content(product).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))?;

        if let Some(price) = data.price
            && price < 0.0
        {
            return Err(RepoError::Validation("price cannot be negative".to_string()));
        }

        // Check duplicate slug if changing
        if let Some(ref new_slug) = data.slug
            && new_slug != &existing.slug
            && self.find_by_slug(new_slug).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Product slug '{}' already exists",
                new_slug
            )));
        }

        #[derive(Serialize)]
        struct ProductUpdateDb {
            #[serde(skip_serializing_if = "Option::is_none")]
            name: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            slug: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            description: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            discount_price: Option<f64>,
            #[serde(skip_serializing_if = "Option::is_none")]
            product_type: Option<crate::db::models::ProductType>,
            #[serde(skip_serializing_if = "Option::is_none")]
            categories: Option<Vec<Thing>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            in_stock: Option<bool>,
            #[serde(skip_serializing_if = "Option::is_none")]
            stock: Option<i32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            variants: Option<Vec<ProductVariant>>,
            #[serde(skip_serializing_if = "Option::is_none")]
            images: Option<Vec<String>>,
            updated_at: chrono::DateTime<Utc>,
        }

        let update_data = ProductUpdateDb {
            name: data.name,
            slug: data.slug,
            description: data.description,
            price: data.price,
            discount_price: data.discount_price,
            product_type: data.product_type,
            categories: data
                .categories
                .map(|ids| ids.iter().map(|id| make_thing(CATEGORY_TABLE, id)).collect()),
            in_stock: data.in_stock,
            stock: data.stock,
            variants: data.variants.map(materialize_variants),
            images: data.images,
            updated_at: Utc::now(),
        };

        let pure_id = strip_table_prefix(TABLE, id);
        let thing = make_thing(TABLE, pure_id);
        self.base
            .db()
            .query("UPDATE $thing MERGE $data")
            .bind(("thing", thing))
            .bind(("data", update_data))
            .await?;

        self.find_by_id(pure_id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Hard delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id);
        let result: Option<Product> = self.base.db().delete((TABLE, pure_id)).await?;
        if result.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        Ok(())
    }
}

/// Assign server-side ids to incoming variant payloads
fn materialize_variants(variants: Vec<VariantCreate>) -> Vec<ProductVariant> {
    variants
        .into_iter()
        .map(|v| ProductVariant {
            id: uuid::Uuid::new_v4().to_string(),
            name: v.name,
            price: v.price,
            discount_price: v.discount_price,
            in_stock: v.in_stock.unwrap_or(true),
            stock: v.stock,
            attributes: v.attributes,
            image: v.image,
        })
        .collect()
}
