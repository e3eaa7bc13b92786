use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{RepoError, TicketRepository};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{SupportTicket, TicketCreate, TicketStatus, TicketStatusUpdate};
use shared::types::{PaginatedResponse, PaginationParams};

/// 仓储层的 NotFound 换成工单域的错误码
fn ticket_not_found(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::TicketNotFound, msg),
        other => other.into(),
    }
}

/// POST /api/tickets - 开工单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TicketCreate>,
) -> AppResult<(StatusCode, Json<SupportTicket>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    let repo = TicketRepository::new(state.db.clone());
    let ticket = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/tickets - 工单列表 (admin, 分页)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PaginatedResponse<SupportTicket>>> {
    let repo = TicketRepository::new(state.db.clone());
    let (tickets, total) = repo.find_page(&params).await?;
    Ok(Json(PaginatedResponse::new(
        tickets,
        params.page,
        params.page_size,
        total.max(0) as u64,
    )))
}

/// GET /api/tickets/:id - 单个工单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SupportTicket>> {
    let repo = TicketRepository::new(state.db.clone());
    let ticket = repo.find_by_id(&id).await.map_err(ticket_not_found)?.ok_or_else(|| {
        AppError::with_message(ErrorCode::TicketNotFound, format!("Ticket {id} not found"))
    })?;
    Ok(Json(ticket))
}

/// GET /api/tickets/user/:user_id - 用户工单列表
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<SupportTicket>>> {
    let repo = TicketRepository::new(state.db.clone());
    Ok(Json(repo.find_by_user(&user_id).await?))
}

/// PUT /api/tickets/:id/status - 推进工单状态
///
/// 只允许沿生命周期前进，closed 的工单不能重开。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TicketStatusUpdate>,
) -> AppResult<Json<SupportTicket>> {
    let next = TicketStatus::parse(&payload.status).ok_or_else(|| {
        AppError::with_message(
            ErrorCode::TicketStatusInvalid,
            format!("Unknown ticket status: {}", payload.status),
        )
    })?;

    let repo = TicketRepository::new(state.db.clone());
    let current = repo.find_by_id(&id).await.map_err(ticket_not_found)?.ok_or_else(|| {
        AppError::with_message(ErrorCode::TicketNotFound, format!("Ticket {id} not found"))
    })?;
    // closed 是终态，给前端一个专门的错误码
    if current.status == TicketStatus::Closed {
        return Err(AppError::with_message(
            ErrorCode::TicketClosed,
            format!("Ticket {} is closed", current.reference),
        ));
    }

    let ticket = repo
        .update_status(&id, next)
        .await
        .map_err(ticket_not_found)?;
    Ok(Json(ticket))
}
