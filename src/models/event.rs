//! Event model and related request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::enums::EventStatus;

/// Event record from the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
}

/// Create event request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEvent {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<EventStatus>,
}

/// Update event request; absent fields are left unchanged
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub status: Option<EventStatus>,
}

/// Query parameters for the event list
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EventQuery {
    /// Substring match on title or location (case-insensitive)
    pub search: Option<String>,
    /// Lower bound on start_time (inclusive)
    pub from: Option<DateTime<Utc>>,
    /// Upper bound on start_time (inclusive)
    pub to: Option<DateTime<Utc>>,
}
