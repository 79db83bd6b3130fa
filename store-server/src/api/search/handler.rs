//! Combined Search Handler

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::catalog::search::{COMBINED_LIMITS, parse_category_filter};
use crate::catalog::{self, CategoryLookup};
use crate::core::ServerState;
use crate::db::repository::{CategoryRepository, ProductRepository};
use crate::utils::AppResult;
use shared::models::{Category as ApiCategory, Product as ApiProduct, SearchResponse};

/// 查询参数
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// 关键词
    pub q: Option<String>,
    /// 逗号分隔的分类 ID 列表
    pub categories: Option<String>,
}

/// GET /api/search?q=&categories= - 商品/分类组合搜索
///
/// 空关键词 + 空分类过滤返回空结果 (不退化为全量浏览)。
/// 商品上限 20，分类上限 5。
pub async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let query = params.q.unwrap_or_default();
    let filter = parse_category_filter(params.categories.as_deref());

    if query.trim().is_empty() && filter.is_empty() {
        return Ok(Json(SearchResponse {
            query,
            results: Vec::new(),
            total: 0,
        }));
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

    let results = catalog::search_catalog(
        &products,
        &categories,
        &lookup,
        &query,
        &filter,
        COMBINED_LIMITS,
    );
    let total = results.len();

    Ok(Json(SearchResponse {
        query,
        results,
        total,
    }))
}
