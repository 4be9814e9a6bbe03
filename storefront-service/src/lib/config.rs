use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

const DEFAULT_JWT_SECRET: &str = "jwt-secret-change-in-production";
const DEFAULT_SESSION_SECRET: &str = "your-secret-key-change-in-production";

/// Flat environment variable names accepted alongside `SECTION__KEY` overrides.
const LEGACY_VARIABLES: [(&str, &str); 7] = [
    ("PORT", "server.http_port"),
    ("APP_ENV", "server.environment"),
    ("SECRET_KEY", "server.session_secret"),
    ("JWT_SECRET_KEY", "jwt.secret"),
    ("SUPABASE_URL", "store.url"),
    ("SUPABASE_KEY", "store.api_key"),
    ("CORS_ORIGINS", "cors.allowed_origins"),
];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub store: StoreConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Reported by the health route ("development" or "production").
    pub environment: String,
    pub session_secret: String,
    /// Put the order routes behind the access guard.
    pub orders_require_auth: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

/// External store (Supabase REST) connection settings.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    /// Comma-separated list of origins, `*` for any.
    pub allowed_origins: String,
}

impl CorsConfig {
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Flat variables (SUPABASE_URL, JWT_SECRET_KEY, PORT, ...)
    /// 2. Environment variables (STORE__URL, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    ///
    /// The store URL and API key have no default; loading fails without them.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|name| env::var(name).ok())
    }

    /// Same as [`Config::load`], reading the flat variables through `lookup`.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = ConfigBuilder::builder()
            .set_default("server.http_port", 5000)?
            .set_default("server.environment", "development")?
            .set_default("server.session_secret", DEFAULT_SESSION_SECRET)?
            .set_default("server.orders_require_auth", false)?
            .set_default("jwt.secret", DEFAULT_JWT_SECRET)?
            .set_default("jwt.expiration_hours", auth::ACCESS_TOKEN_TTL_HOURS)?
            .set_default("store.timeout_secs", 10)?
            .set_default("cors.allowed_origins", "http://localhost:3000")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: STORE__URL=https://... overrides store.url
            .add_source(Environment::default().separator("__").try_parsing(true));

        for (variable, key) in LEGACY_VARIABLES {
            builder = builder.set_override_option(key, lookup(variable))?;
        }

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.store.url.trim().is_empty() {
            return Err(ConfigError::Message("store.url (SUPABASE_URL) is required".into()));
        }
        if self.store.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "store.api_key (SUPABASE_KEY) is required".into(),
            ));
        }
        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Names of secrets still set to their shipped placeholder values.
    pub fn placeholder_secrets(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.jwt.secret == DEFAULT_JWT_SECRET {
            names.push("jwt.secret");
        }
        if self.server.session_secret == DEFAULT_SESSION_SECRET {
            names.push("server.session_secret");
        }
        names
    }

    pub fn is_production(&self) -> bool {
        self.server.environment.eq_ignore_ascii_case("production")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_load_requires_store_settings() {
        let result = Config::load_with(lookup(&[]));
        assert!(result.is_err());

        let result = Config::load_with(lookup(&[("SUPABASE_URL", "https://x.supabase.co")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_defaults() {
        let config = Config::load_with(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_KEY", "service-key"),
        ]))
        .expect("Failed to load config");

        assert_eq!(config.store.url, "https://x.supabase.co");
        assert_eq!(config.store.api_key, "service-key");
        assert_eq!(config.jwt.expiration_hours, 24);
        assert!(!config.server.orders_require_auth);
        assert_eq!(config.cors.origins(), vec!["http://localhost:3000"]);
        assert_eq!(
            config.placeholder_secrets(),
            vec!["jwt.secret", "server.session_secret"]
        );
    }

    #[test]
    fn test_load_flat_overrides() {
        let config = Config::load_with(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_KEY", "service-key"),
            ("PORT", "8081"),
            ("JWT_SECRET_KEY", "a-real-secret-value-of-enough-length"),
            ("CORS_ORIGINS", "http://localhost:8080, http://127.0.0.1:8080,"),
            ("APP_ENV", "production"),
        ]))
        .expect("Failed to load config");

        assert_eq!(config.server.http_port, 8081);
        assert_eq!(config.jwt.secret, "a-real-secret-value-of-enough-length");
        assert!(config.is_production());
        assert_eq!(
            config.cors.origins(),
            vec!["http://localhost:8080", "http://127.0.0.1:8080"]
        );
        assert_eq!(config.placeholder_secrets(), vec!["server.session_secret"]);
    }

    #[test]
    fn test_blank_store_key_rejected() {
        let result = Config::load_with(lookup(&[
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_KEY", "  "),
        ]));
        assert!(result.is_err());
    }
}
