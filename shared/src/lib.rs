//! Shared types for the ENTION storefront
//!
//! Common types used by the store server and its integration tests:
//! error codes, the API response envelope, and the domain models
//! (products, orders, addresses, support tickets).

pub mod error;
pub mod models;
pub mod types;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use types::{PaginatedResponse, PaginationParams};
