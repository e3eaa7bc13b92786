//! Checkout & Order Lifecycle API Handlers
//!
//! Writes delegate to [`OrderManager`](crate::orders::OrderManager); reads go
//! straight to the repository.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::order::{
    Order, OrderCreate, ReturnReceipt, ReturnResolution, ReturnSubmit, StatusUpdate,
};
use shared::types::{PaginatedResponse, PaginationParams};

/// POST /api/checkout/orders - 下单
pub async fn place_order(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let order = state.orders.place_order(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/checkout/orders - 订单分页列表 (后台)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let (orders, total) = repo.find_page(&params).await?;
    Ok(Json(PaginatedResponse::new(
        orders,
        params.page,
        params.page_size,
        total.max(0) as u64,
    )))
}

/// GET /api/checkout/orders/:order_id - 单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.find_by_id(&order_id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {order_id} not found"))
    })?;
    Ok(Json(order))
}

/// GET /api/checkout/orders/user/:user_id - 用户订单列表 (新的在前)
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    Ok(Json(repo.find_by_user(&user_id).await?))
}

/// PUT /api/checkout/orders/:order_id/status - 状态流转
pub async fn update_status(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Json(payload): Json<StatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = state.orders.update_status(&order_id, &payload.status).await?;
    Ok(Json(order))
}

/// POST /api/checkout/orders/:order_id/return - 发起退货
pub async fn submit_return(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
    Json(payload): Json<ReturnSubmit>,
) -> AppResult<Json<ReturnReceipt>> {
    // 长度上限在这里截住，空理由的业务判定留给生命周期管理器
    if payload.reason.len() > MAX_NOTE_LEN {
        return Err(AppError::validation(format!(
            "reason is too long ({} chars, max {MAX_NOTE_LEN})",
            payload.reason.len()
        )));
    }
    validate_optional_text(&payload.comments, "comments", MAX_NOTE_LEN)?;
    let receipt = state.orders.submit_return(&order_id, payload).await?;
    Ok(Json(receipt))
}

/// PUT /api/checkout/orders/:order_id/admin-return - 处理退货，必要时退款
pub async fn resolve_return(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<ReturnResolution>> {
    let resolution = state.orders.resolve_return(&order_id).await?;
    Ok(Json(resolution))
}
