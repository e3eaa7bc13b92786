//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

// Catalog
pub mod product;

// Orders
pub mod order;

// Account
pub mod address;
pub mod ticket;

// Re-exports
pub use address::AddressRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use ticket::TicketRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
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

impl From<RepoError> for shared::error::AppError {
    fn from(err: RepoError) -> Self {
        use shared::error::{AppError, ErrorCode};

        let message = err.to_string();
        match err {
            RepoError::NotFound(_) => AppError::with_message(ErrorCode::NotFound, message),
            RepoError::Duplicate(_) => AppError::with_message(ErrorCode::AlreadyExists, message),
            RepoError::Validation(_) => {
                AppError::with_message(ErrorCode::ValidationFailed, message)
            }
            RepoError::Database(_) => {
                tracing::error!(error = %message, "repository database error");
                AppError::with_message(ErrorCode::DatabaseError, message)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 字符串格式
// =============================================================================
//
// SurrealDB 的 RecordId 不能直接反序列化成 String，所以：
//   - 读取: SELECT 显式投影 + `<string>id AS id` 强制转换
//   - 按 ID 查找: let id: RecordId = "order:abc".parse()?;
//   - 写入: CREATE ... RETURN NONE，然后按唯一键重新读取
//
// 禁止使用旧的 Thing 类型和 make_thing/strip_table_prefix 辅助函数

/// Base repository with database reference
#[derive(Clone, Debug)]
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
