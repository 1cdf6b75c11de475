//! Business logic services

pub mod ai;
pub mod auth;
pub mod catalog;
pub mod email;
pub mod events;
pub mod invitations;

use std::sync::Arc;

use crate::{config::AppConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub events: events::EventsService,
    pub invitations: invitations::InvitationsService,
    pub ai: ai::AiService,
    pub email: email::EmailService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> Self {
        let email = email::EmailService::new(config.email.clone());
        let ai_client = Arc::new(ai::OpenAiChatClient::new(config.ai.clone()));

        Self {
            auth: auth::AuthService::new(repository.clone(), config.auth.clone()),
            catalog: catalog::CatalogService::new(repository.clone()),
            events: events::EventsService::new(repository.clone()),
            invitations: invitations::InvitationsService::new(
                repository,
                email.clone(),
                config.server.public_url.clone(),
            ),
            ai: ai::AiService::new(ai_client),
            email,
        }
    }
}
