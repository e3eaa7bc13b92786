//! Product Catalog API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{ProductRepository, RepoError};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::product::{ModelCode, Product, ProductCreate, ProductUpdate, StockAdjust};

/// Path segment → model code; unknown strings get the dedicated error code
fn parse_model(raw: &str) -> Result<ModelCode, AppError> {
    raw.parse().map_err(|_| {
        AppError::with_message(
            ErrorCode::ProductModelInvalid,
            format!("Unknown product model: {raw}"),
        )
    })
}

/// 价格字段必须为正，validator 的 range 不支持 Decimal，手动卡
fn require_positive_price(price: Option<Decimal>, field: &str) -> Result<(), AppError> {
    if let Some(p) = price
        && p <= Decimal::ZERO
    {
        return Err(AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("{field} must be positive, got {p}"),
        ));
    }
    Ok(())
}

/// 仓储层的 NotFound 换成商品域的错误码
fn product_not_found(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::ProductNotFound, msg),
        other => other.into(),
    }
}

/// GET /api/products - 在售商品列表
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/products/:model - 单个商品
pub async fn get_by_model(
    State(state): State<ServerState>,
    Path(model): Path<String>,
) -> AppResult<Json<Product>> {
    let model = parse_model(&model)?;
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.find_by_model(model).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::ProductNotFound, format!("Product {model} not found"))
    })?;
    Ok(Json(product))
}

/// POST /api/products - 建档商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    require_positive_price(Some(payload.price), "price")?;
    require_positive_price(payload.base_price, "base_price")?;
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await.map_err(|err| match err {
        RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::ProductModelExists, msg),
        other => other.into(),
    })?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/:model - 更新目录字段
pub async fn update(
    State(state): State<ServerState>,
    Path(model): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    let model = parse_model(&model)?;
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    require_positive_price(payload.price, "price")?;
    require_positive_price(payload.base_price, "base_price")?;
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.update(model, payload).await.map_err(product_not_found)?))
}

/// PUT /api/products/:model/restock - 入库补货
pub async fn restock(
    State(state): State<ServerState>,
    Path(model): Path<String>,
    Json(payload): Json<StockAdjust>,
) -> AppResult<Json<Product>> {
    let model = parse_model(&model)?;
    if payload.quantity < 1 {
        return Err(AppError::with_message(
            ErrorCode::StockQuantityInvalid,
            format!("Restock quantity must be at least 1, got {}", payload.quantity),
        ));
    }
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(
        repo.restock(model, payload.quantity).await.map_err(product_not_found)?,
    ))
}

/// GET /api/products/low-stock - 低库存告警列表
pub async fn low_stock(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.find_low_stock().await?))
}

/// DELETE /api/products/:model - 下架并删除商品
pub async fn delete(
    State(state): State<ServerState>,
    Path(model): Path<String>,
) -> AppResult<Json<bool>> {
    let model = parse_model(&model)?;
    let repo = ProductRepository::new(state.db.clone());
    Ok(Json(repo.delete(model).await?))
}
