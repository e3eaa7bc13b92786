//! Database Module
//!
//! Embedded SurrealDB handle plus table and index definitions.

pub mod repository;

use crate::core::{Result, ServerError};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and apply schema definitions
    pub async fn new(db_path: &str) -> Result<Self> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to open database: {e}")))?;

        db.use_ns("ention")
            .use_db("store")
            .await
            .map_err(|e| ServerError::Database(format!("Failed to select namespace: {e}")))?;

        init_schema(&db).await?;

        tracing::info!("Database ready at {} (SurrealDB embedded)", db_path);

        Ok(Self { db })
    }

    /// In-memory database (tests and throwaway environments)
    pub async fn memory() -> Result<Self> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| ServerError::Database(format!("Failed to open in-memory database: {e}")))?;

        db.use_ns("ention")
            .use_db("store")
            .await
            .map_err(|e| ServerError::Database(format!("Failed to select namespace: {e}")))?;

        init_schema(&db).await?;

        Ok(Self { db })
    }
}

/// Table and index definitions
///
/// 幂等：全部 IF NOT EXISTS，重启安全。
/// 唯一索引承担数据层约束 (product.model / order.order_number / ticket.reference)。
async fn init_schema(db: &Surreal<Db>) -> Result<()> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS product SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_product_model ON TABLE product COLUMNS model UNIQUE;

        DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_order_number ON TABLE order COLUMNS order_number UNIQUE;
        DEFINE INDEX IF NOT EXISTS idx_order_user ON TABLE order COLUMNS user_id;

        DEFINE TABLE IF NOT EXISTS address SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_address_user ON TABLE address COLUMNS user_id;

        DEFINE TABLE IF NOT EXISTS ticket SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS idx_ticket_reference ON TABLE ticket COLUMNS reference UNIQUE;
        "#,
    )
    .await
    .map_err(|e| ServerError::Database(format!("Failed to define schema: {e}")))?;

    Ok(())
}
