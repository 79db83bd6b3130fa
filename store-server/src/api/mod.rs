//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`categories`] - 分类管理接口 (树形列表 + CRUD)
//! - [`products`] - 商品管理接口 (列表 + CRUD + 快速搜索)
//! - [`search`] - 商品/分类组合搜索接口

pub mod convert;

pub mod categories;
pub mod health;
pub mod products;
pub mod search;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

use axum::Router;

use crate::core::ServerState;

/// Assemble the application router
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(search::router())
}
