//! Order Model
//!
//! An order embeds its product-configuration snapshot, shipping address,
//! payment sub-object and (optionally) a return request. There is no
//! separate return-request collection.

use super::product::ModelCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Overall order status
///
/// `Returned` is reachable only through return resolution, never through
/// the plain status-update endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Returned,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Returned => "returned",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Parse a status string from request input
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "returned" => Some(OrderStatus::Returned),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Transition table for the status-update endpoint
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Cancelled)
                | (Processing, Shipped)
                | (Processing, Cancelled)
                | (Shipped, Delivered)
        )
    }

    /// Statuses that still hold a reserved stock unit
    pub const fn holds_stock(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method chosen at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cod,
    Online,
}

/// Payment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
    Refunded,
}

/// Embedded payment sub-object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl PaymentInfo {
    /// A refund is possible only for a completed online payment
    pub fn is_refundable(&self) -> bool {
        self.status == PaymentStatus::Success && self.transaction_id.is_some()
    }
}

/// Product configuration snapshot embedded in the order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    pub model: ModelCode,
    #[serde(default = "default_ram")]
    pub selected_ram: String,
    #[serde(default = "default_ssd")]
    pub selected_ssd: String,
    #[serde(default = "default_warranty")]
    pub selected_warranty: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
}

pub fn default_ram() -> String {
    "8GB".to_string()
}

pub fn default_ssd() -> String {
    "512GB".to_string()
}

pub fn default_warranty() -> String {
    "standard".to_string()
}

/// Shipping address embedded in the order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShippingAddress {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(length(min = 8, max = 15))]
    pub phone: String,
    #[validate(length(min = 1, max = 200))]
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub state: String,
    #[validate(custom(function = "crate::models::address::validate_pincode"))]
    pub pincode: String,
}

/// Return request lifecycle status
///
/// `RefundFailed` is terminal and marks money that did not move back;
/// the order stays `delivered` for manual follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReturnStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(rename = "Refund_Failed")]
    RefundFailed,
}

impl ReturnStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReturnStatus::Pending => "Pending",
            ReturnStatus::Approved => "Approved",
            ReturnStatus::Rejected => "Rejected",
            ReturnStatus::RefundFailed => "Refund_Failed",
        }
    }
}

impl fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Return request embedded in the order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub status: ReturnStatus,
    pub requested_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<DateTime<Utc>>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Format: ENTION-<8 digits>-<3 digits>
    pub order_number: String,
    pub user_id: String,
    pub product: ProductConfig,
    pub shipping_address: ShippingAddress,
    pub payment: PaymentInfo,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_request: Option<ReturnRequest>,
    pub created_at: DateTime<Utc>,
}

/// Product configuration carried in the create-order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderProductInput {
    /// Model code string, parsed case-insensitively
    pub model: Option<String>,
    pub name: Option<String>,
    pub selected_ram: Option<String>,
    pub selected_ssd: Option<String>,
    pub selected_warranty: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub base_price: Option<Decimal>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(length(min = 1, max = 100))]
    pub user_id: String,
    pub product: OrderProductInput,
    #[validate(nested)]
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
}

/// Status update payload (raw string, parsed by the lifecycle manager)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// Return submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnSubmit {
    pub reason: String,
    pub comments: Option<String>,
}

/// Response data for a submitted return request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnReceipt {
    pub message: String,
    pub order_id: String,
    pub order_number: String,
}

/// Response data for a resolved return request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnResolution {
    pub message: String,
    pub return_status: ReturnStatus,
    pub order_status: OrderStatus,
}
