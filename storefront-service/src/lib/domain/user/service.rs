use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for account operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account directory implementation
    /// * `authenticator` - Shared authenticator; hashes here verify at login
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<User, UserError> {
        let email = command.credentials.email().to_string();

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::AlreadyExists(email));
        }

        let password_hash = self.authenticator.hash_password(command.credentials.password())?;

        let new_user = NewUser {
            email,
            password_hash,
            name: command.name,
            phone: command.phone,
            role: command.role,
            created_at: Utc::now(),
        };

        let created = self.repository.create(new_user).await.map_err(|e| {
            tracing::error!(error = %e, "Account creation rejected by the store");
            UserError::CreateFailed(e.to_string())
        })?;

        tracing::info!(user_id = %created.id, role = %created.role, "Account created");

        Ok(created)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }
}
