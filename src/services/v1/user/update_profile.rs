use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::config::AuthConfig;
use crate::entities::v1::users::Model;
use crate::errors::{Error, Validation};
use crate::middlewares::v1::auth::{Auth, Authenticated};
use crate::requests::v1::user::UserUpdateProfileRequest;
use crate::responses::v1::user::User;
use crate::security::PasswordHasher;

#[tracing::instrument(skip_all, fields(user_id = %auth.user_id))]
pub async fn update(
    db: &DatabaseConnection,
    config: &AuthConfig,
    cached: &Authenticated,
    auth: &Auth,
    request: UserUpdateProfileRequest,
) -> Result<User, Error> {
    let mut validation = Validation::new();
    let name = request.name.map(|name| name.trim().to_string());
    let password = request.password;

    if let Some(password) = &password {
        if password.len() < config.min_password_length {
            validation.add(
                "password",
                format!(
                    "Password must be at least {} characters.",
                    config.min_password_length
                ),
            );
        }
    }

    if !validation.is_empty() {
        return Err(validation.into());
    }

    let user = Model::find_by_id(db, auth.user_id)
        .await
        .ok_or(Error::NotFound)?;

    let password = match password {
        Some(plain) => {
            let hasher = PasswordHasher::from_config(config)?;

            Some(hasher.hash(&plain)?)
        }
        None => None,
    };

    let user = user.update_profile(db, name, password).await?;

    // Refresh the session entry so a follow-up read sees the new profile.
    let refreshed = Auth {
        id: auth.id,
        user_id: user.id,
        user: (&user).into(),
    };
    cached.set(auth.id, &refreshed, Duration::from_secs(config.session_cache_ttl));

    metrics::counter!("account_profile_updates_total").increment(1);
    tracing::info!(user_id = %user.id, "profile updated");

    Ok(user.into())
}
