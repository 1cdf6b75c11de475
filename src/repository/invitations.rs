//! Invitations repository

use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{enums::InvitationStatus, invitation::Invitation},
};

/// Result of an invitation insert attempt
pub enum InsertOutcome {
    Created(Invitation),
    /// The (event, email) pair already has an invitation
    Duplicate,
}

#[derive(Clone)]
pub struct InvitationsRepository {
    pool: Pool<Postgres>,
}

impl InvitationsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a fresh pending invitation. A violation of the
    /// (event_id, invitee_email) uniqueness constraint is reported as
    /// `Duplicate` rather than an error; anything else propagates.
    pub async fn insert(
        &self,
        event_id: Uuid,
        inviter_id: Uuid,
        invitee_email: &str,
        token: &str,
    ) -> AppResult<InsertOutcome> {
        let result = sqlx::query_as::<_, Invitation>(
            r#"
            INSERT INTO event_invitations (event_id, inviter_id, invitee_email, token, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(inviter_id)
        .bind(invitee_email)
        .bind(token)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(invitation) => Ok(InsertOutcome::Created(invitation)),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Ok(InsertOutcome::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The invitation for an (event, email) pair, if any
    pub async fn get_by_event_and_email(
        &self,
        event_id: Uuid,
        invitee_email: &str,
    ) -> AppResult<Option<Invitation>> {
        let invitation = sqlx::query_as::<_, Invitation>(
            "SELECT * FROM event_invitations WHERE event_id = $1 AND invitee_email = $2",
        )
        .bind(event_id)
        .bind(invitee_email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(invitation)
    }

    /// Resolve an invitation by its opaque token
    pub async fn get_by_token(&self, token: &str) -> AppResult<Invitation> {
        sqlx::query_as::<_, Invitation>("SELECT * FROM event_invitations WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Invitation not found".to_string()))
    }

    /// Invitations for an event, newest first
    pub async fn list_for_event(&self, event_id: Uuid) -> AppResult<Vec<Invitation>> {
        let invitations = sqlx::query_as::<_, Invitation>(
            "SELECT * FROM event_invitations WHERE event_id = $1 ORDER BY created_at DESC",
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(invitations)
    }

    /// Move a pending invitation to a terminal status. The update is
    /// conditional on the row still being pending, so accepted/declined can
    /// never be overwritten.
    pub async fn respond(&self, id: Uuid, status: InvitationStatus) -> AppResult<Invitation> {
        let updated = sqlx::query_as::<_, Invitation>(
            r#"
            UPDATE event_invitations SET status = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(invitation) => Ok(invitation),
            None => {
                let existing = sqlx::query_as::<_, Invitation>(
                    "SELECT * FROM event_invitations WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
                match existing {
                    Some(_) => Err(AppError::Conflict(
                        "Invitation has already been answered".to_string(),
                    )),
                    None => Err(AppError::NotFound("Invitation not found".to_string())),
                }
            }
        }
    }
}
