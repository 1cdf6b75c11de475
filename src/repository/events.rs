//! Events repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::EventStatus,
        event::{CreateEvent, Event, EventQuery, UpdateEvent},
    },
};

#[derive(Clone)]
pub struct EventsRepository {
    pool: Pool<Postgres>,
}

impl EventsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List events visible to a user: those they own, plus those for which
    /// an accepted invitation exists for their email. Optional substring
    /// search on title/location and start_time bounds; ascending start_time.
    pub async fn list_visible(
        &self,
        user_id: Uuid,
        email: &str,
        query: &EventQuery,
    ) -> AppResult<Vec<Event>> {
        let mut conditions = vec![
            r#"(owner_id = $1 OR EXISTS(
                SELECT 1 FROM event_invitations i
                WHERE i.event_id = events.id
                  AND i.invitee_email = $2
                  AND i.status = 'accepted'
            ))"#
            .to_string(),
        ];
        let mut idx = 3;

        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));
        if search.is_some() {
            conditions.push(format!("(title ILIKE ${0} OR location ILIKE ${0})", idx));
            idx += 1;
        }
        if query.from.is_some() {
            conditions.push(format!("start_time >= ${}", idx));
            idx += 1;
        }
        if query.to.is_some() {
            conditions.push(format!("start_time <= ${}", idx));
        }

        let select_q = format!(
            "SELECT * FROM events WHERE {} ORDER BY start_time ASC",
            conditions.join(" AND ")
        );

        let mut builder = sqlx::query_as::<_, Event>(&select_q)
            .bind(user_id)
            .bind(email);
        if let Some(ref pattern) = search {
            builder = builder.bind(pattern);
        }
        if let Some(from) = query.from {
            builder = builder.bind(from);
        }
        if let Some(to) = query.to {
            builder = builder.bind(to);
        }

        let events = builder.fetch_all(&self.pool).await?;
        Ok(events)
    }

    /// Get event by ID
    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Event> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))
    }

    /// Create an event owned by the given user
    pub async fn create(&self, owner_id: Uuid, data: &CreateEvent) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (owner_id, title, start_time, end_time, location, description, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(owner_id)
        .bind(&data.title)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(&data.location)
        .bind(&data.description)
        .bind(data.status.unwrap_or(EventStatus::Upcoming))
        .fetch_one(&self.pool)
        .await?;
        Ok(event)
    }

    /// Update an event; absent fields are left unchanged
    pub async fn update(&self, id: Uuid, data: &UpdateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET
                title = COALESCE($2, title),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time),
                location = COALESCE($5, location),
                description = COALESCE($6, description),
                status = COALESCE($7, status)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.title)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(&data.location)
        .bind(&data.description)
        .bind(data.status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))
    }

    /// Delete an event; its invitations go with it
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Event {} not found", id)));
        }
        Ok(())
    }
}
