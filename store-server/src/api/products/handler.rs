//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::catalog::{self, CategoryLookup};
use crate::core::ServerState;
use crate::db::models::{ProductCreate, ProductUpdate};
use crate::db::repository::{CategoryRepository, ProductRepository};
use crate::utils::{AppError, AppResult};
use shared::models::{Category as ApiCategory, Product as ApiProduct, ProductHit};

/// 商品列表快照上限 (无分页游标)
const LIST_LIMIT: usize = 100;

/// 查询参数
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// 关键词
    pub q: Option<String>,
}

/// GET /api/products - 获取商品快照 (上限 100)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ApiProduct>>> {
    let products = ProductRepository::new(state.db.clone())
        .find_all_capped(LIST_LIMIT)
        .await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/products/by-category/{category_id} - 按分类获取商品
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category_id): Path<String>,
) -> AppResult<Json<Vec<ApiProduct>>> {
    let products = ProductRepository::new(state.db.clone())
        .find_by_category(&category_id)
        .await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// GET /api/products/search?q= - 商品快速搜索 (上限 10)
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<ProductHit>>> {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return Ok(Json(Vec::new()));
    }

    let products: Vec<ApiProduct> = ProductRepository::new(state.db.clone())
        .find_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let categories: Vec<ApiCategory> = CategoryRepository::new(state.db.clone())
        .find_all()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    // Lookup built fresh from this request's snapshot
    let lookup = CategoryLookup::new(&categories);

    Ok(Json(catalog::search_products(&products, &lookup, &query)))
}

/// GET /api/products/{id} - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiProduct>> {
    let product = ProductRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;
    Ok(Json(product.into()))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<ApiProduct>> {
    let product = ProductRepository::new(state.db.clone())
        .create(payload)
        .await?;
    Ok(Json(product.into()))
}

/// PUT /api/products/{id} - 更新商品
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<ApiProduct>> {
    let product = ProductRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(Json(product.into()))
}

/// DELETE /api/products/{id} - 删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    ProductRepository::new(state.db.clone()).delete(&id).await?;
    Ok(Json(true))
}
