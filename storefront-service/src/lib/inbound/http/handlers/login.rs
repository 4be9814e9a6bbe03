use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Same message for an unknown email and a wrong password.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequestBody>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let credentials = Credentials::new(body.email, body.password).map_err(UserError::from)?;

    let user = state
        .user_service
        .get_user_by_email(credentials.email())
        .await
        .map_err(|e| match e {
            UserError::NotFoundByEmail(_) => {
                tracing::info!("Login refused: unknown email");
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            _ => ApiError::from(e),
        })?;

    let result = state
        .authenticator
        .authenticate(
            credentials.password(),
            &user.password_hash,
            user.id.as_str(),
            &user.email,
            user.role,
        )
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                tracing::info!(user_id = %user.id, "Login refused: wrong password");
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            auth::AuthenticationError::Token(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {err}"))
            }
        })?;

    tracing::info!(user_id = %user.id, "Login successful");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthResponseData {
            token: result.access_token,
            user: (&user).into(),
        },
    )
    .with_message("Login successful"))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Token plus public profile, returned by login and signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponseData {
    pub token: String,
    pub user: UserData,
}

/// Public view of an account; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub role: auth::Role,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
