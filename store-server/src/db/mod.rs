//! Database Module
//!
//! 嵌入式 SurrealDB (RocksDB 存储引擎)

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "store";
const DATABASE: &str = "catalog";

/// Database service, owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        let service = Self { db };
        service.define_schema().await?;

        tracing::info!(
            "Database ready at {} (ns={}, db={})",
            db_path,
            NAMESPACE,
            DATABASE
        );
        Ok(service)
    }

    /// Idempotent schema definition (unique slugs, membership index)
    async fn define_schema(&self) -> Result<(), AppError> {
        const DEFINITIONS: &[&str] = &[
            "DEFINE INDEX IF NOT EXISTS category_slug ON category FIELDS slug UNIQUE",
            "DEFINE INDEX IF NOT EXISTS product_slug ON product FIELDS slug UNIQUE",
            "DEFINE INDEX IF NOT EXISTS product_categories ON product FIELDS categories",
        ];

        for statement in DEFINITIONS {
            self.db
                .query(*statement)
                .await
                .map_err(|e| AppError::database(format!("Schema definition failed: {e}")))?;
        }
        Ok(())
    }
}
