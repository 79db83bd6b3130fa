//! 类型转换模块
//!
//! 将数据库模型 (db::models) 转换为 API 响应模型 (shared::models)。
//! Thing 引用在这里统一转成 "table:id" 字符串，离开存储层后
//! 只存在一种标识符表示。

use crate::db::models as db;
use shared::models as api;

// ============ Helper ============

pub fn thing_to_string(thing: &surrealdb::sql::Thing) -> String {
    thing.to_string()
}

pub fn option_thing_to_string(thing: &Option<surrealdb::sql::Thing>) -> Option<String> {
    thing.as_ref().map(thing_to_string)
}

pub fn things_to_strings(things: &[surrealdb::sql::Thing]) -> Vec<String> {
    things.iter().map(thing_to_string).collect()
}

pub fn datetime_to_string(dt: &Option<chrono::DateTime<chrono::Utc>>) -> Option<String> {
    dt.map(|d| d.to_rfc3339())
}

// ============ Category ============

impl From<db::Category> for api::Category {
    fn from(c: db::Category) -> Self {
        Self {
            id: option_thing_to_string(&c.id),
            name: c.name,
            slug: c.slug,
            description: c.description,
            parent: option_thing_to_string(&c.parent),
            image: c.image,
            created_at: datetime_to_string(&c.created_at),
            updated_at: datetime_to_string(&c.updated_at),
        }
    }
}

// ============ Product ============

impl From<db::ProductType> for api::ProductType {
    fn from(t: db::ProductType) -> Self {
        match t {
            db::ProductType::Simple => api::ProductType::Simple,
            db::ProductType::Variable => api::ProductType::Variable,
        }
    }
}

impl From<db::VariantAttribute> for api::VariantAttribute {
    fn from(a: db::VariantAttribute) -> Self {
        Self {
            name: a.name,
            value: a.value,
        }
    }
}

impl From<db::ProductVariant> for api::ProductVariant {
    fn from(v: db::ProductVariant) -> Self {
        Self {
            id: v.id,
            name: v.name,
            price: v.price,
            discount_price: v.discount_price,
            in_stock: v.in_stock,
            stock: v.stock,
            attributes: v.attributes.into_iter().map(Into::into).collect(),
            image: v.image,
        }
    }
}

impl From<db::Product> for api::Product {
    fn from(p: db::Product) -> Self {
        Self {
            id: option_thing_to_string(&p.id),
            name: p.name,
            slug: p.slug,
            description: p.description,
            price: p.price,
            discount_price: p.discount_price,
            product_type: p.product_type.into(),
            categories: things_to_strings(&p.categories),
            in_stock: p.in_stock,
            stock: p.stock,
            variants: p.variants.into_iter().map(Into::into).collect(),
            images: p.images,
            created_at: datetime_to_string(&p.created_at),
            updated_at: datetime_to_string(&p.updated_at),
        }
    }
}
