use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, ContactMessageDto, MessageResponse};

#[derive(Deserialize)]
pub struct ListQuery {
    pub unread: Option<bool>,
    pub limit: Option<u64>,
}

/// GET /api/admin/messages
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<ContactMessageDto>>>, ApiError> {
    let messages = state
        .store()
        .list_contact_messages(query.limit, query.unread.unwrap_or(false))
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch messages: {e}")))?;

    let dtos = messages.into_iter().map(ContactMessageDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /api/admin/messages/{id}
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ContactMessageDto>>, ApiError> {
    let message = state
        .store()
        .get_contact_message(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch message: {e}")))?
        .ok_or_else(|| ApiError::message_not_found(id))?;

    Ok(Json(ApiResponse::success(ContactMessageDto::from(message))))
}

/// PUT /api/admin/messages/{id}/read
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let updated = state
        .store()
        .mark_message_read(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to mark message as read: {e}")))?;

    if updated {
        Ok(Json(ApiResponse::success(MessageResponse {
            message: "Message marked as read".to_string(),
        })))
    } else {
        Err(ApiError::message_not_found(id))
    }
}

/// DELETE /api/admin/messages/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state
        .store()
        .delete_contact_message(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete message: {e}")))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::message_not_found(id))
    }
}
