use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::config::AuthConfig;
use crate::entities::v1::users::Model;
use crate::errors::Error;
use crate::middlewares::v1::auth::{Auth, Authenticated};
use crate::requests::v1::auth::TokenRequest;
use crate::responses::v1::auth::TokenResponse;
use crate::security::{token, PasswordHasher};

/// Check credentials and hand out the user's bearer token.
///
/// Empty fields, an unknown email and a wrong password are deliberately
/// indistinguishable to the caller.
#[tracing::instrument(skip_all, fields(email = %request.email))]
pub async fn issue(
    db: &DatabaseConnection,
    config: &AuthConfig,
    cached: &Authenticated,
    request: TokenRequest,
) -> Result<TokenResponse, Error> {
    let email = request.email.trim().to_lowercase();
    let password = request.password;

    if email.is_empty() || password.is_empty() {
        metrics::counter!("auth_failures_total").increment(1);

        return Err(Error::InvalidCredentials);
    }

    let user = match Model::find_by_email(db, &email).await {
        Some(user) => user,
        None => {
            metrics::counter!("auth_failures_total").increment(1);

            return Err(Error::InvalidCredentials);
        }
    };

    let hasher = PasswordHasher::from_config(config)?;

    if !hasher.verify(&password, &user.password).unwrap_or(false) {
        metrics::counter!("auth_failures_total").increment(1);

        return Err(Error::InvalidCredentials);
    }

    let issued = user.issue_token(db).await?;

    let auth = Auth {
        id: issued.id,
        user_id: user.id,
        user: user.into(),
    };
    cached.set(
        issued.id,
        &auth,
        Duration::from_secs(config.session_cache_ttl),
    );

    metrics::counter!("auth_tokens_issued_total").increment(1);
    tracing::info!(user_id = %auth.user_id, "token issued");

    Ok(TokenResponse {
        token: token::encode(issued.id),
    })
}
