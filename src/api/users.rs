//! User administration endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{UpdateRole, UserProfile},
    },
};

use super::AuthenticatedUser;

/// Assign a role to a user (admin only)
#[utoipa::path(
    put,
    path = "/users/{id}/role",
    tag = "users",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated", body = UserProfile),
        (status = 403, description = "Administrator privileges required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(user_id): Path<Uuid>,
    Json(request): Json<UpdateRole>,
) -> AppResult<Json<UserProfile>> {
    if claims.role != Role::Admin {
        return Err(AppError::Authorization(
            "Administrator privileges required".to_string(),
        ));
    }

    let profile = state.services.auth.set_role(user_id, request.role).await?;
    Ok(Json(profile))
}
