//! Logistics API 模块
//!
//! 物流承运商的薄封装：配送范围查询、时效查询、建运单、轨迹跟踪。
//! 不碰订单状态机，发货后的状态流转走 checkout 的 status 接口。

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/logistics", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/serviceability/{pincode}", get(handler::serviceability))
        .route("/expected/{pincode}", get(handler::expected_delivery))
        .route("/shipments", post(handler::create_shipment))
        .route("/track/{waybill}", get(handler::track))
}
