//! Create the demo admin and customer accounts, skipping any that exist.

use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;
use storefront_service::config::Config;
use storefront_service::domain::user::models::Credentials;
use storefront_service::domain::user::models::SignupCommand;
use storefront_service::domain::user::ports::UserServicePort;
use storefront_service::domain::user::service::UserService;
use storefront_service::outbound::repositories::SupabaseUserRepository;
use storefront_service::outbound::store_client::SupabaseClient;
use storefront_service::user::errors::UserError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const SEED_PASSWORD: &str = "password";

const SEED_ACCOUNTS: [(&str, &str, &str); 2] = [
    ("admin@example.com", "Admin User", "admin"),
    ("customer@example.com", "Customer User", "customer"),
];

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info,storefront_service=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let store_client = SupabaseClient::new(&config.store)?;
    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
    ));
    let user_service = UserService::new(
        Arc::new(SupabaseUserRepository::new(store_client)),
        authenticator,
    );

    for (email, name, role) in SEED_ACCOUNTS {
        let credentials = Credentials::new(Some(email.to_string()), Some(SEED_PASSWORD.to_string()))?;
        let command = SignupCommand::new(
            credentials,
            Some(name.to_string()),
            None,
            Some(role.to_string()),
        );

        match user_service.signup(command).await {
            Ok(user) => tracing::info!(%email, user_id = %user.id, %role, "Seed account created"),
            Err(UserError::AlreadyExists(_)) => {
                tracing::info!(%email, "Seed account already exists, skipping")
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!("Seeding completed");

    Ok(())
}
