use actix_web::post;
use actix_web::web::{Data, Json};
use actix_web::{HttpResponse, Responder};
use sea_orm::DatabaseConnection;

use crate::config::AuthConfig;
use crate::errors::Error;
use crate::middlewares::v1::auth::{Auth, Authenticated};
use crate::requests::v1::user::{UserStoreRequest, UserUpdateProfileRequest};
use crate::responses::v1::user::{Registered, User};
use crate::responses::{BadRequest, Unauthorized};
use crate::services;

/// Register a new account
///
/// Fail if:
/// - email is malformed or already registered
/// - password is shorter than the configured minimum
#[utoipa::path(
    tag = "User",
    responses(
        Registered,
        BadRequest,
    ),
)]
#[post("/v1/user/create")]
pub async fn store(
    db: Data<DatabaseConnection>,
    config: Data<AuthConfig>,
    Json(request): Json<UserStoreRequest>,
) -> Result<impl Responder, Error> {
    let response = services::v1::user::store::store(&db, &config, request).await?;

    Ok(response)
}

/// Current account profile
///
/// Fail if the bearer token is missing, malformed, unknown or expired
#[utoipa::path(
    get,
    path = "/v1/user/me",
    tag = "User",
    security(("token" = [])),
    responses(
        User,
        Unauthorized,
    ),
)]
pub async fn me(auth: Auth) -> Result<impl Responder, Error> {
    Ok(auth.user)
}

/// Update the current account profile
///
/// Fail if:
/// - the bearer token is missing, malformed, unknown or expired
/// - a provided password is shorter than the configured minimum
#[utoipa::path(
    patch,
    path = "/v1/user/me",
    tag = "User",
    security(("token" = [])),
    responses(
        User,
        BadRequest,
        Unauthorized,
    ),
)]
pub async fn update(
    db: Data<DatabaseConnection>,
    config: Data<AuthConfig>,
    cached: Data<Authenticated>,
    auth: Auth,
    Json(request): Json<UserUpdateProfileRequest>,
) -> Result<impl Responder, Error> {
    let response =
        services::v1::user::update_profile::update(&db, &config, &cached, &auth, request).await?;

    Ok(response)
}

/// Default handler for unsupported verbs on the profile resource
pub async fn method_not_allowed() -> Result<HttpResponse, Error> {
    Err(Error::MethodNotAllowed)
}
