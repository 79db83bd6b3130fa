//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables.

pub mod category;
pub mod product;

// Re-exports
pub use category::CategoryRepository;
pub use product::ProductRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::sql::Thing;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 客户端提交的引用既可能带表前缀 ("category:xyz") 也可能是裸 id ("xyz")，
// 入库前一律经 make_thing 归一。

/// Build a record pointer from a table name and an id that may already
/// carry the "table:" prefix
pub fn make_thing(table: &str, id: &str) -> Thing {
    let pure_id = strip_table_prefix(table, id);
    Thing::from((table.to_string(), pure_id.to_string()))
}

/// Extract the bare id from "table:id"; ids without the prefix pass
/// through unchanged
pub fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
