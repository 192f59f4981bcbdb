pub mod app;
pub mod auth;

pub use app::{AppConfig, AppMetadata, DatabaseConfig, ServerConfig};
pub use auth::{Argon2Config, AuthConfig};
pub use config::ConfigError;

/// Sanity checks applied to a configuration section after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
