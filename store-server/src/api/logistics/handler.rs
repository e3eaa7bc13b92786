use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::validate_pincode;

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::services::{DeliveryEstimate, GatewayError, Serviceability, Shipment, TrackingInfo};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text};

/// 承运商调用失败的兜底错误码
fn logistics_error(err: GatewayError) -> AppError {
    let message = err.to_string();
    tracing::error!(error = %message, "logistics provider call failed");
    AppError::with_message(ErrorCode::LogisticsApiError, message)
}

fn parse_pincode(raw: &str) -> Result<(), AppError> {
    validate_pincode(raw).map_err(|_| {
        AppError::with_message(
            ErrorCode::PincodeInvalid,
            format!("Pincode must be 6 digits, got '{raw}'"),
        )
    })
}

/// GET /api/logistics/serviceability/{pincode} - 查询能否配送到该 pincode
///
/// 能送达时返回判定结果 (含 COD 可用性)；不在配送网络内直接报错，
/// 前端据此提示换地址。
pub async fn serviceability(
    State(state): State<ServerState>,
    Path(pincode): Path<String>,
) -> AppResult<Json<Serviceability>> {
    parse_pincode(&pincode)?;

    let verdict = state
        .logistics
        .check_serviceability(&pincode)
        .await
        .map_err(logistics_error)?;

    if !verdict.serviceable {
        return Err(AppError::with_message(
            ErrorCode::PincodeNotServiceable,
            format!("Pincode {pincode} is outside the delivery network"),
        ));
    }

    Ok(Json(verdict))
}

/// GET /api/logistics/expected/{pincode} - 仓库到目的地的预计送达时间
pub async fn expected_delivery(
    State(state): State<ServerState>,
    Path(pincode): Path<String>,
) -> AppResult<Json<DeliveryEstimate>> {
    parse_pincode(&pincode)?;

    let estimate = state
        .logistics
        .expected_delivery(&pincode)
        .await
        .map_err(logistics_error)?;

    Ok(Json(estimate))
}

#[derive(Debug, Deserialize)]
pub struct ShipmentCreate {
    pub order_number: String,
}

/// POST /api/logistics/shipments - 给订单在承运商处建运单
///
/// 承运商拒单时返回拒单原因，订单本身不动。
pub async fn create_shipment(
    State(state): State<ServerState>,
    Json(payload): Json<ShipmentCreate>,
) -> AppResult<Json<Shipment>> {
    validate_required_text(&payload.order_number, "order_number", MAX_SHORT_TEXT_LEN)?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_number(&payload.order_number)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OrderNotFound,
                format!("Order {} not found", payload.order_number),
            )
        })?;

    let shipment = state
        .logistics
        .create_shipment(&order)
        .await
        .map_err(|err| match err {
            GatewayError::Api { status, body } => {
                tracing::error!(
                    order_number = %order.order_number,
                    status,
                    body = %body,
                    "carrier rejected shipment manifest"
                );
                AppError::with_message(
                    ErrorCode::ShipmentCreateFailed,
                    format!("Carrier rejected the shipment ({status}): {body}"),
                )
            }
            other => logistics_error(other),
        })?;

    tracing::info!(
        order_number = %shipment.order_number,
        waybill = %shipment.waybill,
        "shipment registered with carrier"
    );

    Ok(Json(shipment))
}

/// GET /api/logistics/track/{waybill} - 运单轨迹查询
pub async fn track(
    State(state): State<ServerState>,
    Path(waybill): Path<String>,
) -> AppResult<Json<TrackingInfo>> {
    validate_required_text(&waybill, "waybill", MAX_SHORT_TEXT_LEN)?;

    let info = state
        .logistics
        .track(&waybill)
        .await
        .map_err(|err| match err {
            // 承运商查不到这个运单号时返回空的 ShipmentData
            GatewayError::UnexpectedResponse(_) => AppError::with_message(
                ErrorCode::WaybillNotFound,
                format!("Waybill {waybill} not found"),
            ),
            other => logistics_error(other),
        })?;

    Ok(Json(info))
}
