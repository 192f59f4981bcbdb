use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use super::auth::AuthConfig;
use super::Validate;

/// Top-level application configuration that aggregates all config sections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application metadata
    #[serde(default)]
    pub app: AppMetadata,
    /// Server configuration (bind address, workers)
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration (connection URL, pool sizing)
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration (password policy, Argon2 parameters)
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Application metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,
    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
    /// Application environment (development, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL, e.g. `sqlite::memory:` or `postgres://...`
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

fn default_app_name() -> String {
    "account-api".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_database_url() -> String {
    "sqlite://accounts.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    30
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            environment: default_environment(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Validate for AppMetadata {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Message("app.name cannot be empty".to_string()));
        }
        if self.environment.is_empty() {
            return Err(ConfigError::Message(
                "app.environment cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Message(
                "server.host cannot be empty".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(ConfigError::Message(
                "server.workers must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::Message(
                "database.url cannot be empty".to_string(),
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}

/// Layered configuration: `config/default.toml`, then the environment
/// specific file, then `ACCOUNT_API__*` environment variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let environment =
        std::env::var("APP_ENV").unwrap_or_else(|_| default_environment());

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{environment}")).required(false))
        .add_source(
            Environment::with_prefix("ACCOUNT_API")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = config.try_deserialize()?;

    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = AppConfig::default();

        assert_eq!(config.app.name, "account-api");
        assert_eq!(config.server.port, 8080);
        assert!(config.server.workers > 0);
        assert_eq!(config.database.url, "sqlite://accounts.db?mode=rwc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_workers_is_rejected() {
        let config = ServerConfig {
            workers: 0,
            ..ServerConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_database_url_is_rejected() {
        let config = DatabaseConfig {
            url: String::new(),
            ..DatabaseConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn environment_variables_override_defaults() {
        std::env::set_var("ACCOUNT_API__SERVER__PORT", "9000");

        let config = load_config().unwrap();

        assert_eq!(config.server.port, 9000);

        std::env::remove_var("ACCOUNT_API__SERVER__PORT");
    }

    #[test]
    #[serial]
    fn loading_without_sources_yields_defaults() {
        let config = load_config().unwrap();

        assert_eq!(config.auth.min_password_length, 6);
        assert_eq!(config.database.max_connections, 10);
    }
}
