//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::catalog;
use crate::core::ServerState;
use crate::db::models::{CategoryCreate, CategoryUpdate};
use crate::db::repository::{CategoryRepository, ProductRepository};
use crate::utils::{AppError, AppResult};
use shared::models::{Category as ApiCategory, CategoryNode, Product as ApiProduct};

/// GET /api/categories - 分类树 (每个节点含 productCount)
pub async fn tree(State(state): State<ServerState>) -> AppResult<Json<Vec<CategoryNode>>> {
    let categories = CategoryRepository::new(state.db.clone()).find_all().await?;
    let products = ProductRepository::new(state.db.clone()).find_all().await?;

    let categories: Vec<ApiCategory> = categories.into_iter().map(Into::into).collect();
    let products: Vec<ApiProduct> = products.into_iter().map(Into::into).collect();

    Ok(Json(catalog::build_category_tree(categories, &products)))
}

/// GET /api/categories/flat - 全部分类 (平铺)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ApiCategory>>> {
    let categories = CategoryRepository::new(state.db.clone()).find_all().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

/// GET /api/categories/{id} - 获取单个分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiCategory>> {
    let category = CategoryRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {} not found", id)))?;
    Ok(Json(category.into()))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<ApiCategory>> {
    let category = CategoryRepository::new(state.db.clone())
        .create(payload)
        .await?;
    Ok(Json(category.into()))
}

/// PUT /api/categories/{id} - 更新分类
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<ApiCategory>> {
    let category = CategoryRepository::new(state.db.clone())
        .update(&id, payload)
        .await?;
    Ok(Json(category.into()))
}

/// DELETE /api/categories/{id} - 删除分类
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = CategoryRepository::new(state.db.clone()).delete(&id).await?;
    Ok(Json(result))
}
