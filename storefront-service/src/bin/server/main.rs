use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use storefront_service::config::Config;
use storefront_service::domain::order::service::OrderService;
use storefront_service::domain::product::service::ProductService;
use storefront_service::domain::user::service::UserService;
use storefront_service::inbound::http::router::create_router;
use storefront_service::inbound::http::router::AppState;
use storefront_service::inbound::http::router::RouterConfig;
use storefront_service::outbound::repositories::SupabaseOrderRepository;
use storefront_service::outbound::repositories::SupabaseProductRepository;
use storefront_service::outbound::repositories::SupabaseUserRepository;
use storefront_service::outbound::store_client::SupabaseClient;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "storefront-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        store_url = %config.store.url,
        http_port = config.server.http_port,
        environment = %config.server.environment,
        orders_require_auth = config.server.orders_require_auth,
        cors_origins = %config.cors.allowed_origins,
        "Configuration loaded"
    );

    for name in config.placeholder_secrets() {
        if config.is_production() {
            tracing::error!(setting = name, "Placeholder secret in production");
        } else {
            tracing::warn!(setting = name, "Placeholder secret in use");
        }
    }
    if !config.server.orders_require_auth {
        tracing::warn!("Order routes are served without authentication");
    }

    let store_client = SupabaseClient::new(&config.store)?;
    tracing::info!(
        timeout_secs = config.store.timeout_secs,
        "External store client created"
    );

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
    ));

    let user_repository = Arc::new(SupabaseUserRepository::new(store_client.clone()));
    let product_repository = Arc::new(SupabaseProductRepository::new(store_client.clone()));
    let order_repository = Arc::new(SupabaseOrderRepository::new(store_client.clone()));

    let state = AppState {
        user_service: Arc::new(UserService::new(user_repository, Arc::clone(&authenticator))),
        product_service: Arc::new(ProductService::new(product_repository)),
        order_service: Arc::new(OrderService::new(order_repository)),
        store_probe: Arc::new(store_client),
        authenticator,
        environment: config.server.environment.as_str().into(),
    };

    let http_application = create_router(
        state,
        RouterConfig {
            cors_origins: config.cors.origins(),
            orders_require_auth: config.server.orders_require_auth,
        },
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
