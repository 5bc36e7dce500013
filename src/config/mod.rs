use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

const DEV_AUTH_TOKEN_SECRET: &str = "dev-auth-token-secret-change-me";
const DEV_REFRESH_TOKEN_SECRET: &str = "dev-refresh-token-secret-change-me";

/// Upper bound for either token lifetime (one year)
pub const MAX_TOKEN_LIFETIME_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub images: ImageStoreConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    /// Pool acquire timeout in seconds
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub auth_token_secret: String,
    pub refresh_token_secret: String,
    pub auth_token_lifetime_secs: u64,
    pub refresh_token_lifetime_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageStoreConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub folder: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("AUTH_TOKEN_SECRET and REFRESH_TOKEN_SECRET must both be set")]
    MissingSecret,

    #[error("AUTH_TOKEN_SECRET and REFRESH_TOKEN_SECRET must differ")]
    SharedSecret,

    #[error("development token secrets are not allowed in {0:?}")]
    DevelopmentSecret(Environment),

    #[error("{0} must not exceed one year")]
    LifetimeTooLong(&'static str),

    #[error("CLIENT_URL must list explicit origins, '*' is not allowed with credentials")]
    WildcardOrigin,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(v) = env::var("APP_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("CLIENT_URL") {
            self.server.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.server.max_request_size_bytes = v.parse().unwrap_or(self.server.max_request_size_bytes);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Ok(v) = env::var("AUTH_TOKEN_SECRET") {
            self.security.auth_token_secret = v;
        }
        if let Ok(v) = env::var("REFRESH_TOKEN_SECRET") {
            self.security.refresh_token_secret = v;
        }
        if let Ok(v) = env::var("AUTH_TOKEN_LIFETIME") {
            self.security.auth_token_lifetime_secs =
                parse_lifetime(&v).unwrap_or(self.security.auth_token_lifetime_secs);
        }
        if let Ok(v) = env::var("REFRESH_TOKEN_LIFETIME") {
            self.security.refresh_token_lifetime_secs =
                parse_lifetime(&v).unwrap_or(self.security.refresh_token_lifetime_secs);
        }

        // Image store overrides. CLOUDINARY_URL first, individual vars win over it.
        if let Ok(v) = env::var("CLOUDINARY_URL") {
            self.images.apply_cloudinary_url(&v);
        }
        if let Ok(v) = env::var("CLOUDINARY_CLOUD_NAME") {
            self.images.cloud_name = Some(v);
        }
        if let Ok(v) = env::var("CLOUDINARY_API_KEY") {
            self.images.api_key = Some(v);
        }
        if let Ok(v) = env::var("CLOUDINARY_API_SECRET") {
            self.images.api_secret = Some(v);
        }
        if let Ok(v) = env::var("IMAGE_FOLDER") {
            self.images.folder = v;
        }
        if let Ok(v) = env::var("IMAGE_STORE_TIMEOUT_SECS") {
            self.images.timeout_secs = v.parse().unwrap_or(self.images.timeout_secs);
        }

        self
    }

    /// Checks secrets, token lifetimes and CORS origins before the server
    /// accepts traffic
    pub fn validate(&self) -> Result<(), ConfigError> {
        let security = &self.security;
        if security.auth_token_secret.is_empty() || security.refresh_token_secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if security.auth_token_secret == security.refresh_token_secret {
            return Err(ConfigError::SharedSecret);
        }
        if self.environment != Environment::Development
            && (security.auth_token_secret == DEV_AUTH_TOKEN_SECRET
                || security.refresh_token_secret == DEV_REFRESH_TOKEN_SECRET)
        {
            return Err(ConfigError::DevelopmentSecret(self.environment.clone()));
        }
        if security.auth_token_lifetime_secs > MAX_TOKEN_LIFETIME_SECS {
            return Err(ConfigError::LifetimeTooLong("AUTH_TOKEN_LIFETIME"));
        }
        if security.refresh_token_lifetime_secs > MAX_TOKEN_LIFETIME_SECS {
            return Err(ConfigError::LifetimeTooLong("REFRESH_TOKEN_LIFETIME"));
        }
        if self.server.cors_origins.iter().any(|origin| origin == "*") {
            return Err(ConfigError::WildcardOrigin);
        }
        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 5000,
                cors_origins: vec!["http://localhost:5173".to_string()],
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                auth_token_secret: DEV_AUTH_TOKEN_SECRET.to_string(),
                refresh_token_secret: DEV_REFRESH_TOKEN_SECRET.to_string(),
                auth_token_lifetime_secs: 60 * 60,                // 1h
                refresh_token_lifetime_secs: 7 * 24 * 60 * 60,    // 7d
            },
            images: ImageStoreConfig::default(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 5000,
                cors_origins: vec!["https://staging.example.com".to_string()],
                max_request_size_bytes: 8 * 1024 * 1024,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                auth_token_secret: String::new(),
                refresh_token_secret: String::new(),
                auth_token_lifetime_secs: 60 * 60,
                refresh_token_lifetime_secs: 7 * 24 * 60 * 60,
            },
            images: ImageStoreConfig::default(),
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 5000,
                cors_origins: vec!["https://app.example.com".to_string()],
                max_request_size_bytes: 6 * 1024 * 1024,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                auth_token_secret: String::new(),
                refresh_token_secret: String::new(),
                auth_token_lifetime_secs: 60 * 60,
                refresh_token_lifetime_secs: 7 * 24 * 60 * 60,
            },
            images: ImageStoreConfig {
                timeout_secs: 15,
                ..ImageStoreConfig::default()
            },
        }
    }
}

impl Default for ImageStoreConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            folder: "assignment".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ImageStoreConfig {
    /// Reads `cloudinary://<api_key>:<api_secret>@<cloud_name>`
    fn apply_cloudinary_url(&mut self, raw: &str) {
        let Ok(url) = url::Url::parse(raw) else {
            tracing::warn!("Ignoring malformed CLOUDINARY_URL");
            return;
        };
        if url.scheme() != "cloudinary" {
            tracing::warn!("Ignoring CLOUDINARY_URL with scheme '{}'", url.scheme());
            return;
        }
        if let Some(host) = url.host_str() {
            self.cloud_name = Some(host.to_string());
        }
        if !url.username().is_empty() {
            self.api_key = Some(url.username().to_string());
        }
        if let Some(secret) = url.password() {
            self.api_secret = Some(secret.to_string());
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parses token lifetimes written as `3600`, `45s`, `30m`, `1h` or `7d` into seconds
pub fn parse_lifetime(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let (digits, multiplier) = match raw.chars().last()? {
        's' => (&raw[..raw.len() - 1], 1),
        'm' => (&raw[..raw.len() - 1], 60),
        'h' => (&raw[..raw.len() - 1], 60 * 60),
        'd' => (&raw[..raw.len() - 1], 24 * 60 * 60),
        c if c.is_ascii_digit() => (raw, 1),
        _ => return None,
    };
    let value: u64 = digits.trim().parse().ok()?;
    if value == 0 {
        return None;
    }
    value.checked_mul(multiplier)
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
