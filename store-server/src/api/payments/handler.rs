use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Order;
use uuid::Uuid;

use crate::core::ServerState;
use crate::services::GatewayError;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text};

/// 把网关错误翻译成支付域的错误码
///
/// 金额问题是调用方的错 (400)，其余都算网关侧故障 (502)。
fn payment_error(err: GatewayError) -> AppError {
    let message = err.to_string();
    match err {
        GatewayError::InvalidAmount(_) => {
            AppError::with_message(ErrorCode::PaymentInvalidAmount, message)
        }
        _ => {
            tracing::error!(error = %message, "payment gateway call failed");
            AppError::with_message(ErrorCode::PaymentGatewayError, message)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GatewayOrderRequest {
    /// 金额 (卢比)
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// 对账用收据号，不传则生成一个
    pub receipt: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GatewayOrderResponse {
    pub gateway_order_id: String,
    /// 金额 (paise)
    pub amount: i64,
    pub currency: String,
    /// 客户端收银台需要的公钥 id
    pub key_id: String,
}

/// POST /api/payments/order - 在支付网关登记订单
///
/// 返回客户端拉起收银台所需的全部参数。
pub async fn create_order(
    State(state): State<ServerState>,
    Json(payload): Json<GatewayOrderRequest>,
) -> AppResult<Json<GatewayOrderResponse>> {
    validate_optional_text(&payload.receipt, "receipt", MAX_SHORT_TEXT_LEN)?;

    let receipt = payload
        .receipt
        .unwrap_or_else(|| format!("rcpt_{}", Uuid::new_v4().simple()));

    let gateway_order = state
        .payments
        .create_order(payload.amount, &receipt)
        .await
        .map_err(payment_error)?;

    tracing::info!(
        gateway_order_id = %gateway_order.id,
        amount_paise = gateway_order.amount,
        "gateway order registered"
    );

    Ok(Json(GatewayOrderResponse {
        gateway_order_id: gateway_order.id,
        amount: gateway_order.amount,
        currency: gateway_order.currency,
        key_id: state.config.razorpay_key_id.clone(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct PaymentVerifyRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    /// 带上店内订单号则同时盖章该订单的支付状态
    pub order_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PaymentVerifyResponse {
    pub verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

/// POST /api/payments/verify - 验证支付回调签名
///
/// 签名无效时直接 400，订单不做任何改动。
pub async fn verify(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentVerifyRequest>,
) -> AppResult<Json<PaymentVerifyResponse>> {
    validate_required_text(&payload.razorpay_order_id, "razorpay_order_id", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(
        &payload.razorpay_payment_id,
        "razorpay_payment_id",
        MAX_SHORT_TEXT_LEN,
    )?;
    validate_required_text(
        &payload.razorpay_signature,
        "razorpay_signature",
        MAX_SHORT_TEXT_LEN,
    )?;

    match payload.order_number {
        Some(number) => {
            let order = state
                .orders
                .confirm_payment(
                    &number,
                    &payload.razorpay_order_id,
                    &payload.razorpay_payment_id,
                    &payload.razorpay_signature,
                )
                .await?;
            Ok(Json(PaymentVerifyResponse {
                verified: true,
                order: Some(order),
            }))
        }
        // 裸验签：订单还没落库的场合 (例如购物车阶段的预检)
        None => {
            if !state.payments.verify_signature(
                &payload.razorpay_order_id,
                &payload.razorpay_payment_id,
                &payload.razorpay_signature,
            ) {
                return Err(AppError::with_message(
                    ErrorCode::PaymentSignatureInvalid,
                    "Payment signature verification failed",
                ));
            }
            Ok(Json(PaymentVerifyResponse {
                verified: true,
                order: None,
            }))
        }
    }
}
