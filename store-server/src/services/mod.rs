//! Outbound Service Clients
//!
//! Payment gateway and logistics carrier integrations via their REST APIs
//! (no vendor SDK dependency). Both sit behind traits so the order
//! lifecycle can run against stub implementations.

pub mod delhivery;
pub mod razorpay;

pub use delhivery::DelhiveryClient;
pub use razorpay::RazorpayClient;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::Order;
use thiserror::Error;

/// Outbound call failures
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gateway rejected the request ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected gateway response: {0}")]
    UnexpectedResponse(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Order registered on the payment gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    /// Amount in paise
    pub amount: i64,
    pub currency: String,
}

/// Refund as reported by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundReceipt {
    pub id: String,
    pub payment_id: String,
    pub status: String,
}

/// 支付网关接口
///
/// 生产实现为 [`RazorpayClient`]，测试用 stub 替换。
#[async_trait]
pub trait PaymentGateway: Send + Sync + std::fmt::Debug {
    /// Register a gateway-side order for the given rupee amount
    async fn create_order(&self, amount: Decimal, receipt: &str) -> GatewayResult<GatewayOrder>;

    /// Check a checkout callback signature
    fn verify_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool;

    /// Refund a captured payment in full
    async fn refund(&self, payment_id: &str, amount: Decimal) -> GatewayResult<RefundReceipt>;
}

/// Serviceability verdict for a delivery PIN code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Serviceability {
    pub pincode: String,
    pub serviceable: bool,
    pub cod_available: bool,
}

/// Delivery estimate from the warehouse to a destination PIN code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub origin: String,
    pub destination: String,
    /// Expected delivery date as reported by the carrier, when available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_delivery: Option<String>,
}

/// Shipment registered with the carrier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    pub waybill: String,
    pub order_number: String,
    pub status: String,
}

/// One scan event in a tracking history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Tracking snapshot for a waybill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingInfo {
    pub waybill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_status: Option<String>,
    pub events: Vec<TrackingEvent>,
}

/// 物流接口
///
/// 生产实现为 [`DelhiveryClient`]，测试用 stub 替换。
#[async_trait]
pub trait LogisticsProvider: Send + Sync + std::fmt::Debug {
    /// Whether the carrier delivers to this PIN code
    async fn check_serviceability(&self, pincode: &str) -> GatewayResult<Serviceability>;

    /// Expected delivery date for a destination PIN code
    async fn expected_delivery(&self, destination_pincode: &str) -> GatewayResult<DeliveryEstimate>;

    /// Register a shipment for a confirmed order
    async fn create_shipment(&self, order: &Order) -> GatewayResult<Shipment>;

    /// Tracking history for a waybill
    async fn track(&self, waybill: &str) -> GatewayResult<TrackingInfo>;
}
