//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{ai, auth, books, events, health, invitations, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Athenaeum API",
        version = "1.0.0",
        description = "Community library and events REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Athenaeum Team", email = "contact@athenaeum.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        // Users
        users::update_role,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::get_active_borrow,
        books::checkout_book,
        books::return_borrow,
        // Events
        events::list_events,
        events::get_event,
        events::create_event,
        events::update_event,
        events::delete_event,
        // Invitations
        invitations::list_invitations,
        invitations::create_invitation,
        invitations::redeem_invitation,
        invitations::respond_invitation,
        // AI
        ai::extract_event,
        ai::book_metadata,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::RegisterUser,
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::UserProfile,
            crate::models::user::UpdateRole,
            crate::models::enums::Role,
            // Books
            crate::models::book::Book,
            crate::models::book::BookQuery,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::enums::BookStatus,
            crate::models::borrow::Borrow,
            books::BorrowResponse,
            // Events
            crate::models::event::Event,
            crate::models::event::EventQuery,
            crate::models::event::CreateEvent,
            crate::models::event::UpdateEvent,
            crate::models::enums::EventStatus,
            // Invitations
            crate::models::invitation::Invitation,
            crate::models::invitation::CreateInvitation,
            crate::models::invitation::IssueOutcome,
            crate::models::invitation::RespondRequest,
            crate::models::invitation::InvitationResponse,
            crate::models::enums::InvitationStatus,
            invitations::RedeemResponse,
            // AI
            ai::ExtractEventRequest,
            ai::BookMetadataRequest,
            crate::services::ai::EventDraft,
            crate::services::ai::BookMetadata,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "users", description = "User administration"),
        (name = "books", description = "Book catalog and checkout lifecycle"),
        (name = "events", description = "Event scheduling"),
        (name = "invitations", description = "Event invitations"),
        (name = "ai", description = "AI extraction helpers")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
