use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::login::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Profile of the account named by the bearer token.
pub async fn current_user(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .get_user(&current.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
