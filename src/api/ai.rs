//! AI extraction endpoints

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    services::ai::{BookMetadata, EventDraft},
};

use super::AuthenticatedUser;

/// Event extraction request
#[derive(Deserialize, Validate, ToSchema)]
pub struct ExtractEventRequest {
    /// Free text describing the event
    #[validate(length(min = 5, message = "text must be at least 5 characters"))]
    pub text: String,
}

/// Book metadata request
#[derive(Deserialize, Validate, ToSchema)]
pub struct BookMetadataRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
}

/// Extract a structured event draft from free text
#[utoipa::path(
    post,
    path = "/ai/extract-event",
    tag = "ai",
    security(("bearer_auth" = [])),
    request_body = ExtractEventRequest,
    responses(
        (status = 200, description = "Extracted event draft", body = EventDraft),
        (status = 400, description = "Text too short"),
        (status = 502, description = "Extraction failed")
    )
)]
pub async fn extract_event(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<ExtractEventRequest>,
) -> AppResult<Json<EventDraft>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let draft = state
        .services
        .ai
        .extract_event(&request.text, Utc::now())
        .await?;
    Ok(Json(draft))
}

/// Generate a summary and tags for a book
#[utoipa::path(
    post,
    path = "/ai/book-metadata",
    tag = "ai",
    security(("bearer_auth" = [])),
    request_body = BookMetadataRequest,
    responses(
        (status = 200, description = "Generated metadata", body = BookMetadata),
        (status = 400, description = "Missing title or author"),
        (status = 502, description = "Generation failed")
    )
)]
pub async fn book_metadata(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(request): Json<BookMetadataRequest>,
) -> AppResult<Json<BookMetadata>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let metadata = state
        .services
        .ai
        .book_metadata(&request.title, &request.author)
        .await?;
    Ok(Json(metadata))
}
