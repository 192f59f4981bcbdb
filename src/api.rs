use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::{controllers, requests, responses};

/// Registers the bearer scheme referenced by protected paths.
struct Authentication;

impl Modify for Authentication {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::Http(
                    HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Auth"),
        (name = "User"),
        (name = "Health"),
    ),
    modifiers(&Authentication),
    paths(
        controllers::v1::user::store,
        controllers::v1::user::me,
        controllers::v1::user::update,

        controllers::v1::auth::token,

        controllers::health::health,
        controllers::health::health_db,
        controllers::metrics::metrics,
    ),
    components(schemas(
        requests::v1::auth::TokenRequest,
        requests::v1::user::UserStoreRequest,
        requests::v1::user::UserUpdateProfileRequest,

        responses::v1::auth::TokenResponse,
        responses::v1::user::User,
        responses::v1::user::Registered,

        responses::BadRequest,
        responses::Unauthorized,
        responses::MethodNotAllowed,

        controllers::health::LivenessResponse,
        controllers::health::HealthResponse,
    )),
)]
pub struct Definition;
