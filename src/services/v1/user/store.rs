use sea_orm::{DatabaseConnection, SqlErr};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::entities::v1::users::Model;
use crate::errors::{Error, Validation};
use crate::helpers::now;
use crate::requests::v1::user::UserStoreRequest;
use crate::responses::v1::user::Registered;
use crate::security::{PasswordHasher, Validator};

#[tracing::instrument(skip(db, config, request), fields(email = %request.email))]
pub async fn store(
    db: &DatabaseConnection,
    config: &AuthConfig,
    request: UserStoreRequest,
) -> Result<Registered, Error> {
    let mut validation = Validation::new();
    let email = request.email.trim().to_lowercase();
    let name = request.name.unwrap_or_default().trim().to_string();
    let password = request.password;

    if !Validator::validate_email(&email) {
        validation.add("email", "Email address is not valid.");
    }

    if password.len() < config.min_password_length {
        validation.add(
            "password",
            format!(
                "Password must be at least {} characters.",
                config.min_password_length
            ),
        );
    }

    if !validation.is_empty() {
        return Err(validation.into());
    }

    if Model::email_exists(db, &email).await {
        return Err(Error::Duplicate("email"));
    }

    let hasher = PasswordHasher::from_config(config)?;
    let password = hasher.hash(&password)?;

    let model = Model {
        id: Uuid::new_v4(),
        email,
        name,
        password,
        created_at: now(),
        updated_at: now(),
    };

    let model = model.store(db).await.map_err(|e| match e.sql_err() {
        // A concurrent create with the same email loses the race at the
        // unique index; report it like the pre-check would have.
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::Duplicate("email"),
        _ => Error::from(e),
    })?;

    metrics::counter!("account_registrations_total").increment(1);
    tracing::info!(user_id = %model.id, "user created");

    Ok(Registered(model.into()))
}
