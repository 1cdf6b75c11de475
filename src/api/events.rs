//! Event endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::event::{CreateEvent, Event, EventQuery, UpdateEvent},
};

use super::AuthenticatedUser;

/// List events visible to the current user
#[utoipa::path(
    get,
    path = "/events",
    tag = "events",
    security(("bearer_auth" = [])),
    params(EventQuery),
    responses(
        (status = 200, description = "Visible events in ascending start order", body = Vec<Event>)
    )
)]
pub async fn list_events(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<EventQuery>,
) -> AppResult<Json<Vec<Event>>> {
    let events = state.services.events.list_visible(&claims, &query).await?;
    Ok(Json(events))
}

/// Get event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event details", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Event>> {
    let event = state.services.events.get_by_id(id).await?;
    Ok(Json(event))
}

/// Create an event
#[utoipa::path(
    post,
    path = "/events",
    tag = "events",
    security(("bearer_auth" = [])),
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "end_time must be after start_time")
    )
)]
pub async fn create_event(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let event = state.services.events.create(&claims, &request).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// Update an event (owner only)
#[utoipa::path(
    put,
    path = "/events/{id}",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "end_time must be after start_time"),
        (status = 403, description = "Not the event owner"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEvent>,
) -> AppResult<Json<Event>> {
    let event = state.services.events.update(&claims, id, &request).await?;
    Ok(Json(event))
}

/// Delete an event (owner only)
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "events",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 204, description = "Event deleted"),
        (status = 403, description = "Not the event owner"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.services.events.delete(&claims, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
