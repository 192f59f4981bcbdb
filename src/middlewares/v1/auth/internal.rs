use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::web::Data;
use actix_web::{FromRequest, HttpRequest};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::entities::v1::tokens;
use crate::errors::Error;
use crate::responses::v1::user::User;
use crate::security::token;

use super::Authenticated;

/// Request context resolved from a bearer token.
///
/// Extracting this type is what makes a handler authenticated: any request
/// without a resolvable live token is answered with 401 before the handler
/// runs.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Auth {
    /// Token id, kept for cache invalidation
    pub id: Uuid,
    pub user_id: Uuid,
    pub user: User,
}

impl FromRequest for Auth {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let db = req.app_data::<Data<DatabaseConnection>>().cloned();
        let cached = req.app_data::<Data<Authenticated>>().cloned();
        let config = req.app_data::<Data<AuthConfig>>().cloned();
        let header = req.headers().get(header::AUTHORIZATION).cloned();

        Box::pin(async move {
            let (db, cached) = match (db, cached) {
                (Some(db), Some(cached)) => (db, cached),
                _ => {
                    tracing::error!("database connection or session cache not configured");

                    return Err(Error::Internal("missing application state".to_string()));
                }
            };

            // A missing, non-bearer or undecodable credential is the same
            // to the caller: not authenticated.
            let header = header.ok_or(Error::Unauthorized)?;
            let header = header.to_str().map_err(|_| Error::Unauthorized)?;
            let bearer = header.strip_prefix("Bearer ").ok_or(Error::Unauthorized)?;
            let id = token::decode(bearer.trim()).ok_or(Error::Unauthorized)?;

            if let Some(auth) = cached.get(id) {
                return Ok(auth);
            }

            let user = tokens::Model::user(&db, id)
                .await
                .ok_or(Error::Unauthorized)?;

            let auth = Auth {
                id,
                user_id: user.id,
                user: user.into(),
            };

            let ttl = config.map(|c| c.session_cache_ttl).unwrap_or(300);
            cached.set(id, &auth, Duration::from_secs(ttl));

            Ok(auth)
        })
    }
}
