//! Data models
//!
//! Shared between the store server and frontend (via API).
//! Record ids travel as plain strings (`table:key`); timestamps are UTC.

pub mod address;
pub mod order;
pub mod product;
pub mod ticket;

// Re-exports
pub use address::*;
pub use order::*;
pub use product::*;
pub use ticket::*;
