//! Authentication and account service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::Role,
        user::{LoginResponse, RegisterUser, User, UserClaims, UserProfile},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new account. Email is stored lowercased; the role defaults
    /// to member until an admin assigns one.
    pub async fn register(&self, data: RegisterUser) -> AppResult<UserProfile> {
        let email = data.email.trim().to_lowercase();
        let hash = self.hash_password(&data.password)?;
        let user = self
            .repository
            .users
            .create(&email, &hash, data.display_name.as_deref())
            .await?;

        Ok(UserProfile {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: Role::Member,
        })
    }

    /// Authenticate by email and password, returning a bearer token and the
    /// resolved profile
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let email = email.trim().to_lowercase();
        let user = self
            .repository
            .users
            .get_by_email(&email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let role = self.repository.users.get_role(user.id).await?;
        let token = self.create_token(&user, role)?;

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            user: UserProfile {
                id: user.id,
                email: user.email,
                display_name: user.display_name,
                role,
            },
        })
    }

    /// Current profile for an authenticated user
    pub async fn profile(&self, user_id: Uuid) -> AppResult<UserProfile> {
        let user = self.repository.users.get_by_id(user_id).await?;
        let role = self.repository.users.get_role(user.id).await?;
        Ok(UserProfile {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role,
        })
    }

    /// Assign a role to a user (admin only, checked by the caller)
    pub async fn set_role(&self, user_id: Uuid, role: Role) -> AppResult<UserProfile> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.users.set_role(user_id, role).await?;
        self.profile(user_id).await
    }

    /// Create JWT token for a user
    fn create_token(&self, user: &User, role: Role) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Verify user password
    fn verify_password(&self, user: &User, password: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(&user.password)
            .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash a password using Argon2
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
        Ok(hash.to_string())
    }
}
