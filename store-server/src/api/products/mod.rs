//! Product Catalog API 模块

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/low-stock", get(handler::low_stock))
        .route(
            "/{model}",
            get(handler::get_by_model)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{model}/restock", put(handler::restock))
}
