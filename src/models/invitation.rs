//! Invitation model and related request types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::enums::InvitationStatus;

/// Invitation record. The token is the sole credential for the public
/// accept/decline flow.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Invitation {
    pub id: Uuid,
    pub event_id: Uuid,
    pub inviter_id: Uuid,
    pub invitee_email: String,
    pub token: String,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
}

/// Issue invitation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInvitation {
    #[validate(email(message = "Invalid email format"))]
    pub invitee_email: String,
}

/// Outcome of issuing an invitation. A duplicate (event, email) pair is not
/// an error; the existing token is handed back instead.
#[derive(Debug, Serialize, ToSchema)]
pub struct IssueOutcome {
    pub token: String,
    pub status: InvitationStatus,
    pub already_invited: bool,
}

/// Respond to invitation request
#[derive(Debug, Deserialize, ToSchema)]
pub struct RespondRequest {
    pub response: InvitationResponse,
}

/// The two terminal answers an invitee can give
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InvitationResponse {
    Accepted,
    Declined,
}

impl From<InvitationResponse> for InvitationStatus {
    fn from(r: InvitationResponse) -> Self {
        match r {
            InvitationResponse::Accepted => InvitationStatus::Accepted,
            InvitationResponse::Declined => InvitationStatus::Declined,
        }
    }
}
