//! Support Ticket API 模块
//!
//! | 路由 | 方法 | 说明 |
//! |------|------|------|
//! | /api/tickets | POST | 开工单 |
//! | /api/tickets | GET | 工单列表 (admin, 分页) |
//! | /api/tickets/{id} | GET | 单个工单 |
//! | /api/tickets/user/{user_id} | GET | 用户工单列表 |
//! | /api/tickets/{id}/status | PUT | 推进工单状态 |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tickets", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/user/{user_id}", get(handler::list_by_user))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
}
