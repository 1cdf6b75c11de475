//! Events service

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        event::{CreateEvent, Event, EventQuery, UpdateEvent},
        user::UserClaims,
    },
    policy,
    repository::Repository,
};

#[derive(Clone)]
pub struct EventsService {
    repository: Repository,
}

impl EventsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Events visible to the current user: owned, or carrying an accepted
    /// invitation for their email
    pub async fn list_visible(&self, claims: &UserClaims, query: &EventQuery) -> AppResult<Vec<Event>> {
        self.repository
            .events
            .list_visible(claims.user_id, &claims.email(), query)
            .await
    }

    /// Get event by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Event> {
        self.repository.events.get_by_id(id).await
    }

    /// Create an event owned by the current user
    pub async fn create(&self, claims: &UserClaims, data: &CreateEvent) -> AppResult<Event> {
        validate_times(data.start_time, data.end_time)?;
        self.repository.events.create(claims.user_id, data).await
    }

    /// Update an event (owner only). The time ordering invariant is checked
    /// against the merged result before anything is written.
    pub async fn update(&self, claims: &UserClaims, id: Uuid, data: &UpdateEvent) -> AppResult<Event> {
        let event = self.repository.events.get_by_id(id).await?;
        self.require_owner(&event, claims)?;

        let start = data.start_time.unwrap_or(event.start_time);
        let end = data.end_time.unwrap_or(event.end_time);
        validate_times(start, end)?;

        self.repository.events.update(id, data).await
    }

    /// Delete an event (owner only)
    pub async fn delete(&self, claims: &UserClaims, id: Uuid) -> AppResult<()> {
        let event = self.repository.events.get_by_id(id).await?;
        self.require_owner(&event, claims)?;
        self.repository.events.delete(id).await
    }

    fn require_owner(&self, event: &Event, claims: &UserClaims) -> AppResult<()> {
        if policy::can_manage_event(event.owner_id, Some(claims.user_id)) {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Only the event owner may modify it".to_string(),
            ))
        }
    }
}

/// An event must end strictly after it starts
fn validate_times(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<()> {
    if end <= start {
        return Err(AppError::Validation(
            "end_time must be after start_time".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn end_must_follow_start() {
        let start = Utc::now();
        assert!(validate_times(start, start + Duration::hours(1)).is_ok());
        assert!(validate_times(start, start).is_err());
        assert!(validate_times(start, start - Duration::minutes(5)).is_err());
    }
}
