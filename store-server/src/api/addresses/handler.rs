use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{AddressRepository, RepoError};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Address, AddressCreate, AddressUpdate};

/// 仓储层的 NotFound 换成地址域的错误码
fn address_not_found(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::AddressNotFound, msg),
        other => other.into(),
    }
}

/// GET /api/addresses/user/:user_id - 用户地址列表
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Address>>> {
    let repo = AddressRepository::new(state.db.clone());
    Ok(Json(repo.find_by_user(&user_id).await?))
}

/// POST /api/addresses - 新增地址
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AddressCreate>,
) -> AppResult<(StatusCode, Json<Address>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let repo = AddressRepository::new(state.db.clone());
    let address = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(address)))
}

/// PUT /api/addresses/:id - 修改地址
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AddressUpdate>,
) -> AppResult<Json<Address>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let repo = AddressRepository::new(state.db.clone());
    let address = repo.update(&id, payload).await.map_err(address_not_found)?;
    Ok(Json(address))
}

/// DELETE /api/addresses/:id - 删除地址
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = AddressRepository::new(state.db.clone());
    Ok(Json(repo.delete(&id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SetDefaultRequest {
    /// 归属校验：只能把自己名下的地址设为默认
    pub user_id: String,
}

/// PUT /api/addresses/:id/default - 设为默认地址
///
/// 先清掉该用户原来的默认标记再设置新的，保证同一用户最多一个默认地址。
pub async fn set_default(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SetDefaultRequest>,
) -> AppResult<Json<Address>> {
    let repo = AddressRepository::new(state.db.clone());
    let address = repo
        .set_default(&payload.user_id, &id)
        .await
        .map_err(address_not_found)?;
    Ok(Json(address))
}
