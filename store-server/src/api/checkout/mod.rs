//! Checkout & Order Lifecycle API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/checkout/orders | POST | 下单 (扣库存) |
//! | /api/checkout/orders | GET | 订单分页列表 (后台) |
//! | /api/checkout/orders/{order_id} | GET | 单个订单 |
//! | /api/checkout/orders/user/{user_id} | GET | 用户订单列表 |
//! | /api/checkout/orders/{order_id}/status | PUT | 状态流转 |
//! | /api/checkout/orders/{order_id}/return | POST | 发起退货 |
//! | /api/checkout/orders/{order_id}/admin-return | PUT | 处理退货 (退款) |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/checkout/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::place_order).get(handler::list))
        .route("/user/{user_id}", get(handler::list_by_user))
        .route("/{order_id}", get(handler::get_by_id))
        .route("/{order_id}/status", put(handler::update_status))
        .route("/{order_id}/return", post(handler::submit_return))
        .route("/{order_id}/admin-return", put(handler::resolve_return))
}
