use chrono::Duration;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::Claims;
use crate::token::Role;
use crate::token::TokenCodec;
use crate::token::TokenError;

/// Authentication coordinator combining credential hashing and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `token_secret` - Secret key for token signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(token_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(token_secret, token_ttl),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a session token for the identity.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `Token` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        email: &str,
        role: Role,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_codec.issue(subject, email, role)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// Used right after account creation, where the caller has just set the password.
    pub fn issue_token(&self, subject: &str, email: &str, role: Role) -> Result<String, TokenError> {
        self.token_codec.issue(subject, email, role)
    }

    /// Validate and decode a session token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        self.token_codec.verify(token)
    }
}
