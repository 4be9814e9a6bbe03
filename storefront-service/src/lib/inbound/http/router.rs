use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderValue;
use axum::http::Method;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::AllowOrigin;
use tower_http::cors::Any as AnyOrigin;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::not_found;
use super::handlers::orders::create_order;
use super::handlers::orders::list_orders;
use super::handlers::orders::orders_test;
use super::handlers::products::get_product;
use super::handlers::products::list_categories;
use super::handlers::products::list_products;
use super::handlers::signup::signup;
use super::handlers::ApiError;
use super::middleware::require_admin;
use super::middleware::require_auth;
use super::middleware::short_circuit_preflight;
use crate::domain::health::StoreProbe;
use crate::domain::order::ports::OrderServicePort;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub product_service: Arc<dyn ProductServicePort>,
    pub order_service: Arc<dyn OrderServicePort>,
    pub store_probe: Arc<dyn StoreProbe>,
    pub authenticator: Arc<Authenticator>,
    /// Deployment name reported by the health route.
    pub environment: Arc<str>,
}

#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// Allowed CORS origins; `*` allows any origin without credentials.
    pub cors_origins: Vec<String>,
    /// Put `/api/orders` behind the access guard.
    pub orders_require_auth: bool,
}

pub fn create_router(state: AppState, config: RouterConfig) -> Router {
    let auth_guard = middleware::from_fn_with_state(state.authenticator.clone(), require_auth);

    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/login", post(login))
        .route("/api/auth/signup", post(signup))
        .route("/api/products", get(list_products))
        .route("/api/products/", get(list_products))
        .route("/api/products/categories", get(list_categories))
        .route("/api/products/:id", get(get_product))
        .route("/api/orders/test", get(orders_test));

    let mut order_routes = Router::new()
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/", get(list_orders).post(create_order));
    if config.orders_require_auth {
        order_routes = order_routes.route_layer(auth_guard.clone());
    }

    let authenticated_routes = Router::new()
        .route("/api/auth/me", get(current_user))
        .route_layer(auth_guard.clone());

    // Last layer runs first: authenticate, then check the role.
    let admin_routes = Router::new()
        .route("/api/admin/orders", get(list_orders))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(auth_guard);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(order_routes)
        .merge(authenticated_routes)
        .merge(admin_routes)
        .fallback(not_found)
        .layer(middleware::from_fn(short_circuit_preflight))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(trace_layer)
        .layer(cors_layer(&config.cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(AnyOrigin);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(%origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer
        .allow_origin(AllowOrigin::list(allowed))
        .allow_credentials(true)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(%detail, "Handler panicked");

    ApiError::InternalServerError("Internal server error".to_string()).into_response()
}
