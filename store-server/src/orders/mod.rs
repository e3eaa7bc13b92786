//! Order Lifecycle Module
//!
//! Every mutation of an order document goes through [`OrderManager`]:
//!
//! - **Checkout**: atomic stock reservation, order-number generation,
//!   compensating stock release when the persist step fails
//! - **Status updates**: closed transition table, `delivered_at` stamping,
//!   stock release on cancellation
//! - **Returns**: submission gated by delivery status and the return window,
//!   admin resolution with refund orchestration
//! - **Payment confirmation**: gateway signature verification and the
//!   `pending → processing` promotion
//!
//! # Lifecycle
//!
//! ```text
//! place_order ──► pending ──► processing ──► shipped ──► delivered
//!  (stock -1)        │             │                         │
//!                    ▼             ▼                         ▼ submit_return
//!                cancelled     cancelled              ReturnRequest Pending
//!                (stock +1)    (stock +1)                    │
//!                                                            ▼ resolve_return
//!                                       refund ok / not needed ──► returned
//!                                       refund failed ──► Refund_Failed
//!                                                         (order stays delivered)
//! ```
//!
//! Read paths (get by id, list by user, admin pagination) stay on
//! [`OrderRepository`](crate::db::repository::OrderRepository) directly;
//! the manager exists for writes because only writes carry invariants.

pub mod manager;

// Re-exports
pub use manager::{FlowResult, OrderFlowError, OrderManager};
