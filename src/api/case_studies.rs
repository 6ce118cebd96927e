use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::validation::Validator;
use super::{ApiError, ApiResponse, AppState, CaseStudyDto};
use crate::db::{CaseStudyInput, CaseStudyPatch};

#[derive(Deserialize)]
pub struct ListQuery {
    pub featured: Option<bool>,
    pub limit: Option<u64>,
}

#[derive(Deserialize)]
pub struct CreateCaseStudyRequest {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub description: String,
    pub cover_image: String,
    pub client_name: String,
    pub client_industry: String,
    pub duration: Option<String>,
    pub services: Vec<String>,
    pub challenge: String,
    pub solution: String,
    pub result: String,
    pub images: Option<Vec<String>>,
    pub technologies: Option<Vec<String>>,
    pub testimonial: Option<String>,
    pub testimonial_author: Option<String>,
    pub testimonial_role: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Partial update: absent fields keep their stored values. Optional columns
/// use a double Option so `"duration": null` clears while omission keeps.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateCaseStudyRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub excerpt: Option<String>,
    pub description: Option<String>,
    pub cover_image: Option<String>,
    pub client_name: Option<String>,
    pub client_industry: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub duration: Option<Option<String>>,
    pub services: Option<Vec<String>>,
    pub challenge: Option<String>,
    pub solution: Option<String>,
    pub result: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub images: Option<Option<Vec<String>>>,
    #[serde(deserialize_with = "double_option")]
    pub technologies: Option<Option<Vec<String>>>,
    #[serde(deserialize_with = "double_option")]
    pub testimonial: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub testimonial_author: Option<Option<String>>,
    #[serde(deserialize_with = "double_option")]
    pub testimonial_role: Option<Option<String>>,
    pub featured: Option<bool>,
}

fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}

// ============================================================================
// Public Handlers
// ============================================================================

/// GET /api/case-studies
pub async fn list_public(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<Vec<CaseStudyDto>>>, ApiError> {
    let studies = state
        .store()
        .list_case_studies(query.limit, query.featured)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch case studies: {e}")))?;

    let dtos = studies.into_iter().map(CaseStudyDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /api/case-studies/{slug}
pub async fn get_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<CaseStudyDto>>, ApiError> {
    let study = state
        .store()
        .get_case_study_by_slug(&slug)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch case study: {e}")))?
        .ok_or_else(|| ApiError::case_study_not_found(&slug))?;

    Ok(Json(ApiResponse::success(CaseStudyDto::from(study))))
}

// ============================================================================
// Admin Handlers
// ============================================================================

/// GET /api/admin/case-studies
pub async fn list_admin(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CaseStudyDto>>>, ApiError> {
    let studies = state
        .store()
        .list_case_studies(None, None)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch case studies: {e}")))?;

    let dtos = studies.into_iter().map(CaseStudyDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// GET /api/admin/case-studies/{id}
pub async fn get_admin(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<CaseStudyDto>>, ApiError> {
    let study = state
        .store()
        .get_case_study(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to fetch case study: {e}")))?
        .ok_or_else(|| ApiError::case_study_not_found(id))?;

    Ok(Json(ApiResponse::success(CaseStudyDto::from(study))))
}

/// POST /api/admin/case-studies
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateCaseStudyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut v = Validator::new();
    v.require("title", &payload.title)
        .slug("slug", &payload.slug)
        .require("excerpt", &payload.excerpt)
        .require("description", &payload.description)
        .require("cover_image", &payload.cover_image)
        .require("client_name", &payload.client_name)
        .require("client_industry", &payload.client_industry)
        .non_empty_list("services", &payload.services)
        .require("challenge", &payload.challenge)
        .require("solution", &payload.solution)
        .require("result", &payload.result);
    v.finish()?;

    if state
        .store()
        .get_case_study_by_slug(&payload.slug)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to check slug: {e}")))?
        .is_some()
    {
        return Err(ApiError::validation("slug", "Slug already exists"));
    }

    let created = state
        .store()
        .create_case_study(CaseStudyInput {
            title: payload.title,
            slug: payload.slug,
            excerpt: payload.excerpt,
            description: payload.description,
            cover_image: payload.cover_image,
            client_name: payload.client_name,
            client_industry: payload.client_industry,
            duration: payload.duration,
            services: payload.services,
            challenge: payload.challenge,
            solution: payload.solution,
            result: payload.result,
            images: payload.images,
            technologies: payload.technologies,
            testimonial: payload.testimonial,
            testimonial_author: payload.testimonial_author,
            testimonial_role: payload.testimonial_role,
            featured: payload.featured,
        })
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create case study: {e}")))?;

    state
        .notifications()
        .case_study_published(&created.title, &created.slug, &created.client_name)
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CaseStudyDto::from(created))),
    ))
}

/// PUT /api/admin/case-studies/{id}
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCaseStudyRequest>,
) -> Result<Json<ApiResponse<CaseStudyDto>>, ApiError> {
    let mut v = Validator::new();
    if let Some(title) = &payload.title {
        v.require("title", title);
    }
    if let Some(slug) = &payload.slug {
        v.slug("slug", slug);
    }
    if let Some(services) = &payload.services {
        v.non_empty_list("services", services);
    }
    v.finish()?;

    let patch = CaseStudyPatch {
        title: payload.title,
        slug: payload.slug,
        excerpt: payload.excerpt,
        description: payload.description,
        cover_image: payload.cover_image,
        client_name: payload.client_name,
        client_industry: payload.client_industry,
        duration: payload.duration,
        services: payload.services,
        challenge: payload.challenge,
        solution: payload.solution,
        result: payload.result,
        images: payload.images,
        technologies: payload.technologies,
        testimonial: payload.testimonial,
        testimonial_author: payload.testimonial_author,
        testimonial_role: payload.testimonial_role,
        featured: payload.featured,
    };

    let updated = state
        .store()
        .update_case_study(id, patch)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to update case study: {e}")))?
        .ok_or_else(|| ApiError::case_study_not_found(id))?;

    Ok(Json(ApiResponse::success(CaseStudyDto::from(updated))))
}

/// DELETE /api/admin/case-studies/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state
        .store()
        .delete_case_study(id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to delete case study: {e}")))?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::case_study_not_found(id))
    }
}
