//! Payments API 模块
//!
//! 在线支付两步曲：先建网关订单拿到客户端收银台参数，支付完成后
//! 回传验签并盖章订单。

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/order", post(handler::create_order))
        .route("/verify", post(handler::verify))
}
