use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::login::AuthResponseData;
use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use crate::domain::user::models::Credentials;
use crate::domain::user::models::SignupCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn signup(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<SignupRequestBody>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let command = body.try_into_command()?;

    let user = state.user_service.signup(command).await?;

    let token = state
        .authenticator
        .issue_token(user.id.as_str(), &user.email, user.role)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {e}")))?;

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        AuthResponseData {
            token,
            user: (&user).into(),
        },
    )
    .with_message("User created successfully"))
}

/// HTTP request body for signup (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequestBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl SignupRequestBody {
    fn try_into_command(self) -> Result<SignupCommand, UserError> {
        let credentials = Credentials::new(self.email, self.password)?;
        Ok(SignupCommand::new(
            credentials,
            self.name,
            self.phone,
            self.role,
        ))
    }
}
