use std::fmt;

use auth::Role;
use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::CredentialsError;

/// User aggregate entity.
///
/// Represents a registered storefront account together with its credential
/// record. The hash never leaves the service boundary.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub password_hash: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// User unique identifier, assigned by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email and password as submitted by a caller, trimmed and non-empty.
///
/// Email comparison is case-sensitive, exactly as stored.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Trim both fields and require each to be non-empty.
    ///
    /// # Errors
    /// * `Missing` - Either field is absent or blank
    pub fn new(email: Option<String>, password: Option<String>) -> Result<Self, CredentialsError> {
        let email = email.as_deref().map(str::trim).unwrap_or_default();
        let password = password.as_deref().map(str::trim).unwrap_or_default();

        if email.is_empty() || password.is_empty() {
            return Err(CredentialsError::Missing);
        }

        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Command to register a new account.
#[derive(Debug)]
pub struct SignupCommand {
    pub credentials: Credentials,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
}

impl SignupCommand {
    /// Build a signup command from raw request fields.
    ///
    /// Blank optional fields become `None`; an unknown or missing role becomes `customer`.
    pub fn new(
        credentials: Credentials,
        name: Option<String>,
        phone: Option<String>,
        role: Option<String>,
    ) -> Self {
        Self {
            credentials,
            name: non_blank(name),
            phone: non_blank(phone),
            role: role.as_deref().map(Role::coerce).unwrap_or_default(),
        }
    }
}

/// Account and credential record to be written in one store call.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
