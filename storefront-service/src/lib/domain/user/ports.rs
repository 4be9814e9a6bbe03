use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated credentials plus optional profile fields and role
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `AlreadyExists` - An account with this email is already registered
    /// * `CreateFailed` - The store did not create the record
    /// * `Store` - The existence check could not reach the store
    async fn signup(&self, command: SignupCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Store` - Store operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve user by email, matched exactly.
    ///
    /// # Errors
    /// * `NotFoundByEmail` - No user with this email
    /// * `Store` - Store operation failed
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserError>;
}

/// Account directory operations against the `users` collection.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist account and credential record in a single call.
    ///
    /// # Returns
    /// The stored user, including its store-assigned id
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}
