use actix_web::post;
use actix_web::web::{Data, Json};
use actix_web::Responder;
use sea_orm::DatabaseConnection;

use crate::config::AuthConfig;
use crate::errors::Error;
use crate::middlewares::v1::auth::Authenticated;
use crate::requests::v1::auth::TokenRequest;
use crate::responses::v1::auth::TokenResponse;
use crate::responses::BadRequest;
use crate::services;

/// Issue a bearer token
///
/// Fail if:
/// - email is unknown
/// - email or password is empty
/// - password is incorrect
#[utoipa::path(
    tag = "Auth",
    responses(
        TokenResponse,
        BadRequest,
    ),
)]
#[post("/v1/user/token")]
pub async fn token(
    db: Data<DatabaseConnection>,
    config: Data<AuthConfig>,
    cached: Data<Authenticated>,
    Json(request): Json<TokenRequest>,
) -> Result<impl Responder, Error> {
    let response = services::v1::auth::token::issue(&db, &config, &cached, request).await?;

    Ok(response)
}
