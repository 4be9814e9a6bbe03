use std::sync::Arc;

use auth::Authenticator;
use auth::Role;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::Method;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated identity placed in request extensions by [`require_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl From<auth::Claims> for CurrentUser {
    fn from(claims: auth::Claims) -> Self {
        Self {
            user_id: UserId::new(claims.sub),
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Middleware that validates the bearer token and adds the identity to request extensions
pub async fn require_auth(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)
        .ok_or_else(|| ApiError::Unauthorized("Token is missing".to_string()))?;

    let claims = authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    req.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(req).await)
}

/// Second gate for admin routes; must run after [`require_auth`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;

    if !user.role.is_admin() {
        tracing::info!(user_id = %user.user_id, "Admin route refused");
        return Err(ApiError::Forbidden("Admin access required".to_string()));
    }

    Ok(next.run(req).await)
}

/// Answer every `OPTIONS` request with an empty `200`; the CORS layer
/// around it supplies the headers.
pub async fn short_circuit_preflight(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(req).await
}

fn extract_bearer_token(req: &Request) -> Option<&str> {
    let header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use axum::body::Body;
    use axum::middleware::from_fn;
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::Extension;
    use axum::Router;
    use chrono::Duration;
    use chrono::Utc;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    const SECRET: &[u8] = b"middleware-test-secret";

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET, Duration::hours(24)))
    }

    async fn whoami(Extension(user): Extension<CurrentUser>) -> String {
        format!("{}:{}", user.user_id, user.role)
    }

    fn guarded() -> Router {
        Router::new()
            .route("/me", get(whoami))
            .route_layer(from_fn_with_state(authenticator(), require_auth))
    }

    fn admin_only() -> Router {
        Router::new()
            .route("/admin", get(whoami))
            .route_layer(from_fn(require_admin))
            .route_layer(from_fn_with_state(authenticator(), require_auth))
    }

    async fn send(router: Router, uri: &str, authorization: Option<String>) -> (StatusCode, String) {
        let mut request = Request::builder().uri(uri);
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        let response = router
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn message(body: &str) -> String {
        let value: Value = serde_json::from_str(body).unwrap();
        value["message"].as_str().unwrap_or_default().to_string()
    }

    fn token(role: Role) -> String {
        authenticator()
            .issue_token("u-1", "a@b.com", role)
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_header() {
        let (status, body) = send(guarded(), "/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "Token is missing");
    }

    #[tokio::test]
    async fn test_header_without_bearer_prefix() {
        let (status, body) = send(guarded(), "/me", Some(token(Role::Customer))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "Token is missing");

        let (status, body) =
            send(guarded(), "/me", Some(format!("Token {}", token(Role::Customer)))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "Token is missing");
    }

    #[tokio::test]
    async fn test_invalid_token() {
        let (status, body) = send(guarded(), "/me", Some("Bearer not-a-token".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_expired_token() {
        let expired = auth::TokenCodec::new(SECRET, Duration::hours(24))
            .issue_at("u-1", "a@b.com", Role::Customer, Utc::now() - Duration::hours(25))
            .unwrap();

        let (status, body) = send(guarded(), "/me", Some(format!("Bearer {expired}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_valid_token_reaches_handler() {
        let (status, body) = send(
            guarded(),
            "/me",
            Some(format!("Bearer {}", token(Role::Customer))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "u-1:customer");
    }

    #[tokio::test]
    async fn test_admin_gate() {
        let (status, body) = send(
            admin_only(),
            "/admin",
            Some(format!("Bearer {}", token(Role::Customer))),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(message(&body), "Admin access required");

        let (status, body) = send(
            admin_only(),
            "/admin",
            Some(format!("Bearer {}", token(Role::Admin))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "u-1:admin");
    }

    #[tokio::test]
    async fn test_admin_gate_without_auth() {
        let router = Router::new()
            .route("/admin", get(|| async { "unreachable" }))
            .route_layer(from_fn(require_admin));

        let (status, body) = send(router, "/admin", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message(&body), "Authentication required");
    }

    #[tokio::test]
    async fn test_preflight_short_circuit() {
        let router = Router::new()
            .route("/x", get(|| async { "handled" }))
            .layer(from_fn(short_circuit_preflight));

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/x")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
