//! Invitation service: issue and the public token-redemption flow

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::InvitationStatus,
        event::Event,
        invitation::{Invitation, InvitationResponse, IssueOutcome},
        user::UserClaims,
    },
    policy,
    repository::{invitations::InsertOutcome, Repository},
    services::email::EmailService,
};

#[derive(Clone)]
pub struct InvitationsService {
    repository: Repository,
    email: EmailService,
    public_url: String,
}

impl InvitationsService {
    pub fn new(repository: Repository, email: EmailService, public_url: String) -> Self {
        Self {
            repository,
            email,
            public_url,
        }
    }

    /// Issue an invitation for an event (owner only).
    ///
    /// A second invitation for the same (event, email) pair is not an error:
    /// the existing token is returned with `already_invited` set so the
    /// caller can present the existing link.
    pub async fn issue(
        &self,
        claims: &UserClaims,
        event_id: Uuid,
        invitee_email: &str,
    ) -> AppResult<IssueOutcome> {
        let event = self.repository.events.get_by_id(event_id).await?;
        if !policy::can_invite(event.owner_id, Some(claims.user_id)) {
            return Err(AppError::Authorization(
                "Only the event owner may invite".to_string(),
            ));
        }

        let email = normalize_email(invitee_email);
        if email.is_empty() {
            return Err(AppError::Validation("Invitee email is required".to_string()));
        }
        if email == claims.email() {
            return Err(AppError::Validation(
                "You cannot invite yourself".to_string(),
            ));
        }

        let token = generate_token();
        match self
            .repository
            .invitations
            .insert(event_id, claims.user_id, &email, &token)
            .await?
        {
            InsertOutcome::Created(invitation) => {
                // Invitation delivery is best-effort; the link is still
                // returned to the caller on failure
                let link = self.invite_link(&invitation.token);
                if let Err(e) = self.email.send_invitation(&email, &event.title, &link).await {
                    tracing::warn!("Failed to send invitation email to {}: {}", email, e);
                }

                Ok(IssueOutcome {
                    token: invitation.token,
                    status: invitation.status,
                    already_invited: false,
                })
            }
            InsertOutcome::Duplicate => {
                let existing = self
                    .repository
                    .invitations
                    .get_by_event_and_email(event_id, &email)
                    .await?
                    .ok_or_else(|| {
                        AppError::Internal("Duplicate invitation could not be loaded".to_string())
                    })?;

                Ok(IssueOutcome {
                    token: existing.token,
                    status: existing.status,
                    already_invited: true,
                })
            }
        }
    }

    /// Invitations for an event (owner only), newest first
    pub async fn list_for_event(
        &self,
        claims: &UserClaims,
        event_id: Uuid,
    ) -> AppResult<Vec<Invitation>> {
        let event = self.repository.events.get_by_id(event_id).await?;
        if !policy::can_invite(event.owner_id, Some(claims.user_id)) {
            return Err(AppError::Authorization(
                "Only the event owner may list invitations".to_string(),
            ));
        }
        self.repository.invitations.list_for_event(event_id).await
    }

    /// Resolve an invitation and its event by token. The token is the sole
    /// credential; no session is required.
    pub async fn redeem(&self, token: &str) -> AppResult<(Invitation, Event)> {
        let invitation = self.repository.invitations.get_by_token(token).await?;
        let event = self
            .repository
            .events
            .get_by_id(invitation.event_id)
            .await?;
        Ok((invitation, event))
    }

    /// Answer a pending invitation. Accepted and declined are terminal; a
    /// second answer is rejected and the stored status never changes.
    pub async fn respond(
        &self,
        token: &str,
        response: InvitationResponse,
    ) -> AppResult<Invitation> {
        let invitation = self.repository.invitations.get_by_token(token).await?;
        self.repository
            .invitations
            .respond(invitation.id, InvitationStatus::from(response))
            .await
    }

    fn invite_link(&self, token: &str) -> String {
        format!("{}/invite/{}", self.public_url.trim_end_matches('/'), token)
    }
}

/// Emails are compared and stored lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Invitation tokens are 32 random alphanumeric chars: unguessable, fixed
/// format, and the sole credential for the public flow.
pub fn generate_token() -> String {
    use rand::Rng;
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_normalized() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn token_format() {
        let token = generate_token();
        assert_eq!(token.len(), 32);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token, generate_token());
    }
}
