use config::ConfigError;
use serde::{Deserialize, Serialize};

use super::Validate;

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum accepted password length
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
    /// Session cache TTL in seconds
    #[serde(default = "default_session_cache_ttl")]
    pub session_cache_ttl: u64,
    /// Argon2 configuration
    #[serde(default = "Argon2Config::default")]
    pub argon2: Argon2Config,
}

/// Argon2 password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KB (64MB = 65536 KB)
    #[serde(default = "default_argon2_memory_cost")]
    pub memory_cost: u32,
    /// Time cost (iterations)
    #[serde(default = "default_argon2_time_cost")]
    pub time_cost: u32,
    /// Parallelism (number of threads)
    #[serde(default = "default_argon2_parallelism")]
    pub parallelism: u32,
    /// Hash length in bytes
    #[serde(default = "default_argon2_hash_length")]
    pub hash_length: u32,
    /// Salt length in bytes
    #[serde(default = "default_argon2_salt_length")]
    pub salt_length: u32,
}

fn default_min_password_length() -> usize {
    6
}

fn default_session_cache_ttl() -> u64 {
    300 // 5 minutes
}

fn default_argon2_memory_cost() -> u32 {
    65536 // 64 MB
}

fn default_argon2_time_cost() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_argon2_hash_length() -> u32 {
    32
}

fn default_argon2_salt_length() -> u32 {
    16
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            min_password_length: default_min_password_length(),
            session_cache_ttl: default_session_cache_ttl(),
            argon2: Argon2Config::default(),
        }
    }
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: default_argon2_memory_cost(),
            time_cost: default_argon2_time_cost(),
            parallelism: default_argon2_parallelism(),
            hash_length: default_argon2_hash_length(),
            salt_length: default_argon2_salt_length(),
        }
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.min_password_length == 0 {
            return Err(ConfigError::Message(
                "auth.min_password_length must be > 0".to_string(),
            ));
        }
        if self.session_cache_ttl == 0 {
            return Err(ConfigError::Message(
                "auth.session_cache_ttl must be > 0".to_string(),
            ));
        }
        self.argon2.validate()?;
        Ok(())
    }
}

impl Validate for Argon2Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_cost == 0 {
            return Err(ConfigError::Message(
                "auth.argon2.memory_cost must be > 0".to_string(),
            ));
        }
        if self.time_cost == 0 {
            return Err(ConfigError::Message(
                "auth.argon2.time_cost must be > 0".to_string(),
            ));
        }
        if self.parallelism == 0 {
            return Err(ConfigError::Message(
                "auth.argon2.parallelism must be > 0".to_string(),
            ));
        }
        if self.hash_length == 0 {
            return Err(ConfigError::Message(
                "auth.argon2.hash_length must be > 0".to_string(),
            ));
        }
        if self.salt_length == 0 {
            return Err(ConfigError::Message(
                "auth.argon2.salt_length must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_config_defaults() {
        let config = AuthConfig::default();

        assert_eq!(config.min_password_length, 6);
        assert_eq!(config.session_cache_ttl, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn argon2_config_defaults() {
        let config = Argon2Config::default();

        assert_eq!(config.memory_cost, 65536); // 64 MB
        assert_eq!(config.time_cost, 3);
        assert_eq!(config.parallelism, 4);
        assert_eq!(config.hash_length, 32);
        assert_eq!(config.salt_length, 16);
    }

    #[test]
    fn zero_minimum_password_length_is_rejected() {
        let config = AuthConfig {
            min_password_length: 0,
            ..AuthConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_memory_cost_is_rejected() {
        let config = Argon2Config {
            memory_cost: 0,
            ..Argon2Config::default()
        };

        assert!(config.validate().is_err());
    }
}
