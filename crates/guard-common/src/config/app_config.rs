//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub server: ServerConfig,
    pub telegram: TelegramConfig,
    pub storage: StorageBackend,
    pub database: Option<DatabaseConfig>,
    pub moderation: ModerationConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Liveness server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Telegram Bot API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    pub bot_token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Long-poll timeout in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout: u64,
    /// Per-request timeout in seconds, must exceed the poll timeout
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl TelegramConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Where offender and ban state is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local maps; state is lost on restart
    Memory,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection before failing the call
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout: u64,
}

/// Moderation behavior toggles
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationConfig {
    /// Only chat administrators may run `/unban`
    #[serde(default = "default_unban_admin_only")]
    pub unban_admin_only: bool,
}

// Default value functions
fn default_app_name() -> String {
    "contract-guard".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    45
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    10
}

fn default_unban_admin_only() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = match var("STORAGE_BACKEND").as_deref().map(str::to_lowercase) {
            None => StorageBackend::default(),
            Some(s) if s == "postgres" => StorageBackend::Postgres,
            Some(s) if s == "memory" => StorageBackend::Memory,
            Some(other) => return Err(ConfigError::InvalidValue("STORAGE_BACKEND", other)),
        };

        let database = match var("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&var, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
                acquire_timeout: parse_or(&var, "DATABASE_ACQUIRE_TIMEOUT", default_acquire_timeout)?,
            }),
            None if storage == StorageBackend::Postgres => {
                return Err(ConfigError::MissingVar("DATABASE_URL"));
            }
            None => None,
        };

        let telegram = TelegramConfig {
            bot_token: var("BOT_TOKEN")
                .filter(|t| !t.is_empty())
                .ok_or(ConfigError::MissingVar("BOT_TOKEN"))?,
            api_url: var("TELEGRAM_API_URL").unwrap_or_else(default_api_url),
            poll_timeout: parse_or(&var, "TELEGRAM_POLL_TIMEOUT", default_poll_timeout)?,
            request_timeout: parse_or(&var, "TELEGRAM_REQUEST_TIMEOUT", default_request_timeout)?,
        };

        if telegram.request_timeout <= telegram.poll_timeout {
            return Err(ConfigError::InvalidValue(
                "TELEGRAM_REQUEST_TIMEOUT",
                format!(
                    "{} must be greater than TELEGRAM_POLL_TIMEOUT ({})",
                    telegram.request_timeout, telegram.poll_timeout
                ),
            ));
        }

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env: var("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            server: ServerConfig {
                host: var("HOST").unwrap_or_else(default_host),
                port: parse_or(&var, "PORT", default_port)?,
            },
            telegram,
            storage,
            database,
            moderation: ModerationConfig {
                unban_admin_only: parse_or(&var, "UNBAN_ADMIN_ONLY", default_unban_admin_only)?,
            },
        })
    }
}

/// Parse an optional variable, falling back to a default when unset
fn parse_or<F, T>(var: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
