//! Address Book API 模块
//!
//! | 路由 | 方法 | 说明 |
//! |------|------|------|
//! | /api/addresses/user/{user_id} | GET | 用户地址列表 (默认地址在前) |
//! | /api/addresses | POST | 新增地址 |
//! | /api/addresses/{id} | PUT | 修改地址 |
//! | /api/addresses/{id} | DELETE | 删除地址 |
//! | /api/addresses/{id}/default | PUT | 设为默认地址 |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/addresses", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/user/{user_id}", get(handler::list_by_user))
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/default", put(handler::set_default))
}
