use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::Validator;
use super::{ApiError, ApiResponse, AppState, SiteSettingDto};
use crate::db::SettingInput;

#[derive(Deserialize)]
pub struct SaveSettingRequest {
    pub value: Option<String>,
    pub category: String,
    #[serde(rename = "type", default = "default_setting_type")]
    pub setting_type: String,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_setting_type() -> String {
    "text".to_string()
}

/// GET /api/admin/settings
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<SiteSettingDto>>>, ApiError> {
    let settings = state
        .store()
        .list_settings()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch settings: {e}")))?;

    let dtos = settings.into_iter().map(SiteSettingDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /api/admin/settings/{category}
pub async fn by_category(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<Vec<SiteSettingDto>>>, ApiError> {
    let settings = state
        .store()
        .get_settings_by_category(&category)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch settings: {e}")))?;

    let dtos = settings.into_iter().map(SiteSettingDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// PUT /api/admin/settings/{key}
/// Creates the setting when the key is new, updates it otherwise.
pub async fn save(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(payload): Json<SaveSettingRequest>,
) -> Result<Json<ApiResponse<SiteSettingDto>>, ApiError> {
    let mut v = Validator::new();
    v.require("key", &key)
        .require("category", &payload.category)
        .setting_type("type", &payload.setting_type);
    v.finish()?;

    let setting = state
        .store()
        .save_setting(SettingInput {
            key,
            value: payload.value,
            description: payload.description,
            category: payload.category,
            setting_type: payload.setting_type,
        })
        .await
        .map_err(|e| ApiError::internal(format!("Failed to save setting: {e}")))?;

    Ok(Json(ApiResponse::success(SiteSettingDto::from(setting))))
}
