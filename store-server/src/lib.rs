//! Storefront Catalog Server - 电商目录服务
//!
//! # 架构概述
//!
//! 单一 HTTP 服务，为 Web 店面提供商品/分类浏览、搜索和 CRUD 接口：
//!
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (RocksDB 引擎)
//! - **目录核心** (`catalog`): 分类树构建、搜索聚合、价格区间
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! store-server/src/
//! ├── core/      # 配置、状态、错误
//! ├── db/        # 数据库层 (models + repository)
//! ├── catalog/   # 纯计算核心 (请求级、无缓存)
//! ├── api/       # HTTP 路由和处理器
//! └── utils/     # 工具函数
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState};
pub use crate::utils::{AppError, AppResult};

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), None, log_dir.as_deref());

    Ok(())
}

/// 打印启动横幅
pub fn print_banner() {
    tracing::info!("========================================");
    tracing::info!("  Storefront Catalog Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("========================================");
}
