use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use crate::cache::{CacheKey, LocalCache};

// Re-export the internal Auth type for use with the cache
pub use super::internal::Auth;

/// In-process cache of resolved token → user associations.
///
/// Only ever a cache: the `tokens` table stays authoritative, entries
/// expire after the configured session TTL.
#[derive(Clone)]
pub struct Authenticated {
    cache: Arc<LocalCache>,
}

impl Authenticated {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(LocalCache::new()),
        }
    }

    #[tracing::instrument(skip(self), fields(token_id = %token_id))]
    pub fn get(&self, token_id: Uuid) -> Option<Auth> {
        let key = CacheKey::token(token_id);

        match self.cache.get::<Auth>(&key) {
            Ok(auth) => {
                if auth.is_some() {
                    tracing::debug!("Auth cache hit");
                } else {
                    tracing::debug!("Auth cache miss");
                }

                auth
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read auth from cache");

                None
            }
        }
    }

    #[tracing::instrument(skip(self, auth), fields(token_id = %token_id, user_id = %auth.user_id))]
    pub fn set(&self, token_id: Uuid, auth: &Auth, ttl: Duration) {
        let key = CacheKey::token(token_id);

        if let Err(e) = self.cache.set(&key, auth, ttl) {
            tracing::error!(error = %e, "Failed to cache auth");
        }
    }

    #[tracing::instrument(skip(self), fields(token_id = %token_id))]
    pub fn remove(&self, token_id: Uuid) {
        self.cache.delete(&CacheKey::token(token_id));
    }
}

impl Default for Authenticated {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::v1::user::User;

    fn auth() -> Auth {
        Auth {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            user: User {
                email: "jane@example.com".to_string(),
                name: "Jane".to_string(),
            },
        }
    }

    #[test]
    fn cached_auth_round_trips() {
        let cached = Authenticated::new();
        let auth = auth();

        cached.set(auth.id, &auth, Duration::from_secs(60));

        let resolved = cached.get(auth.id).unwrap();

        assert_eq!(resolved.user_id, auth.user_id);
        assert_eq!(resolved.user.email, auth.user.email);
    }

    #[test]
    fn removed_entries_stop_resolving() {
        let cached = Authenticated::new();
        let auth = auth();

        cached.set(auth.id, &auth, Duration::from_secs(60));
        cached.remove(auth.id);

        assert!(cached.get(auth.id).is_none());
    }

    #[test]
    fn expired_entries_stop_resolving() {
        let cached = Authenticated::new();
        let auth = auth();

        cached.set(auth.id, &auth, Duration::from_secs(0));

        assert!(cached.get(auth.id).is_none());
    }
}
