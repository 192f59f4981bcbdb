use argon2::password_hash::{
    PasswordHash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

use crate::config::auth::AuthConfig;

/// Argon2id password hasher configured from [`AuthConfig`].
///
/// Every hash carries its own salt and parameters in PHC string format
/// (`$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`), so verification needs
/// no extra state. Verification is constant time.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Build a hasher from the configured Argon2 parameters.
    ///
    /// Fails if the parameters are out of range for the algorithm.
    #[tracing::instrument(skip(config))]
    pub fn from_config(config: &AuthConfig) -> Result<Self, argon2::password_hash::Error> {
        let params = Params::new(
            config.argon2.memory_cost,
            config.argon2.time_cost,
            config.argon2.parallelism,
            Some(config.argon2.hash_length as usize),
        )?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        Ok(Self { argon2 })
    }

    /// Hash a password with a freshly generated salt.
    #[tracing::instrument(skip(self, password))]
    pub fn hash(&self, password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon2.hash_password(password.as_bytes(), &salt)?;

        Ok(hash.to_string())
    }

    /// Verify a candidate password against a stored PHC hash string.
    ///
    /// Returns `Ok(false)` on mismatch; errors only for malformed hashes.
    #[tracing::instrument(skip(self, password, hash))]
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
        let parsed_hash = PasswordHash::new(hash)?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::auth::{Argon2Config, AuthConfig};

    fn test_config() -> AuthConfig {
        AuthConfig {
            min_password_length: 6,
            session_cache_ttl: 300,
            argon2: Argon2Config {
                memory_cost: 19456,
                time_cost: 1,
                parallelism: 1,
                hash_length: 32,
                salt_length: 16,
            },
        }
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = PasswordHasher::from_config(&test_config()).unwrap();
        let hash1 = hasher.hash("password123").unwrap();
        let hash2 = hasher.hash("password123").unwrap();

        assert_ne!(hash1, hash2, "salts must differ between hashes");
    }

    #[test]
    fn verify_accepts_the_original_password() {
        let hasher = PasswordHasher::from_config(&test_config()).unwrap();
        let hash = hasher.hash("correct_password").unwrap();

        assert!(hasher.verify("correct_password", &hash).unwrap());
    }

    #[test]
    fn verify_rejects_a_wrong_password() {
        let hasher = PasswordHasher::from_config(&test_config()).unwrap();
        let hash = hasher.hash("correct_password").unwrap();

        assert!(!hasher.verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_phc_argon2id_strings() {
        let hasher = PasswordHasher::from_config(&test_config()).unwrap();
        let hash = hasher.hash("test_password").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
    }

    #[test]
    fn verification_is_case_sensitive() {
        let hasher = PasswordHasher::from_config(&test_config()).unwrap();
        let hash = hasher.hash("Password123").unwrap();

        assert!(hasher.verify("Password123", &hash).unwrap());
        assert!(!hasher.verify("password123", &hash).unwrap());
    }

    #[test]
    fn malformed_hashes_error_out() {
        let hasher = PasswordHasher::from_config(&test_config()).unwrap();

        assert!(hasher.verify("password", "not_a_phc_string").is_err());
    }

    #[test]
    fn unicode_passwords_round_trip() {
        let hasher = PasswordHasher::from_config(&test_config()).unwrap();
        let password = "пароль123🔐";
        let hash = hasher.hash(password).unwrap();

        assert!(hasher.verify(password, &hash).unwrap());
    }
}
