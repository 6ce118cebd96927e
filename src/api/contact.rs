use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::validation::Validator;
use super::{ApiError, ApiResponse, AppState, ContactMessageDto};

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ContactSubmission {
    pub message: String,
    pub contact: ContactMessageDto,
}

/// POST /api/contact
///
/// The message is persisted first; the owner notification email is a
/// best-effort side effect and never turns a stored submission into an
/// error response.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut v = Validator::new();
    v.require("name", &payload.name)
        .require("subject", &payload.subject)
        .require("message", &payload.message)
        .email("email", &payload.email);
    v.finish()?;

    let saved = state
        .store()
        .create_contact_message(
            &payload.name,
            &payload.email,
            &payload.subject,
            &payload.message,
        )
        .await
        .map_err(|e| ApiError::internal(format!("Failed to save message: {e}")))?;

    let emailed = state
        .notifications()
        .contact_message(
            &payload.name,
            &payload.email,
            &payload.subject,
            &payload.message,
        )
        .await;

    let message = if emailed {
        "Your message has been sent!"
    } else {
        "Your message was received but there was an issue sending the email notification."
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ContactSubmission {
            message: message.to_string(),
            contact: ContactMessageDto::from(saved),
        })),
    ))
}
