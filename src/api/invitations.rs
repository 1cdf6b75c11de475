//! Invitation endpoints
//!
//! Issuing and listing require the event owner's session; redemption and
//! response are public, authorized by the token alone.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        event::Event,
        invitation::{CreateInvitation, Invitation, IssueOutcome, RespondRequest},
    },
};

use super::AuthenticatedUser;

/// Public view of an invitation resolved by token
#[derive(Serialize, ToSchema)]
pub struct RedeemResponse {
    pub invitation: Invitation,
    pub event: Event,
}

/// List invitations for an event (owner only)
#[utoipa::path(
    get,
    path = "/events/{id}/invitations",
    tag = "invitations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Invitations, newest first", body = Vec<Invitation>),
        (status = 403, description = "Not the event owner"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn list_invitations(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Vec<Invitation>>> {
    let invitations = state
        .services
        .invitations
        .list_for_event(&claims, event_id)
        .await?;
    Ok(Json(invitations))
}

/// Issue an invitation (owner only)
#[utoipa::path(
    post,
    path = "/events/{id}/invitations",
    tag = "invitations",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Event ID")),
    request_body = CreateInvitation,
    responses(
        (status = 201, description = "Invitation issued (or already existed)", body = IssueOutcome),
        (status = 400, description = "Invalid email or self-invite"),
        (status = 403, description = "Not the event owner"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn create_invitation(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(event_id): Path<Uuid>,
    Json(request): Json<CreateInvitation>,
) -> AppResult<(StatusCode, Json<IssueOutcome>)> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let outcome = state
        .services
        .invitations
        .issue(&claims, event_id, &request.invitee_email)
        .await?;

    let status = if outcome.already_invited {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(outcome)))
}

/// Resolve an invitation by token (public)
#[utoipa::path(
    get,
    path = "/invitations/{token}",
    tag = "invitations",
    params(("token" = String, Path, description = "Invitation token")),
    responses(
        (status = 200, description = "Invitation and its event", body = RedeemResponse),
        (status = 404, description = "Invitation not found")
    )
)]
pub async fn redeem_invitation(
    State(state): State<crate::AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<RedeemResponse>> {
    let (invitation, event) = state.services.invitations.redeem(&token).await?;
    Ok(Json(RedeemResponse { invitation, event }))
}

/// Accept or decline a pending invitation (public)
#[utoipa::path(
    post,
    path = "/invitations/{token}/respond",
    tag = "invitations",
    params(("token" = String, Path, description = "Invitation token")),
    request_body = RespondRequest,
    responses(
        (status = 200, description = "Invitation answered", body = Invitation),
        (status = 404, description = "Invitation not found"),
        (status = 409, description = "Invitation has already been answered")
    )
)]
pub async fn respond_invitation(
    State(state): State<crate::AppState>,
    Path(token): Path<String>,
    Json(request): Json<RespondRequest>,
) -> AppResult<Json<Invitation>> {
    let invitation = state
        .services
        .invitations
        .respond(&token, request.response)
        .await?;
    Ok(Json(invitation))
}
