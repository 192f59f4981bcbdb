use actix_web::body::BoxBody;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoResponses, ToSchema};

/// Bearer token issued after a successful credential check.
#[derive(
    Clone, Debug, Serialize, Deserialize, ToSchema, IntoResponses, PartialEq, Eq, Hash,
)]
#[response(status = 200, description = "OK")]
pub struct TokenResponse {
    #[schema(example = "BoNnEXO1SkSkM1z8sYYb-g")]
    pub token: String,
}

impl Responder for TokenResponse {
    type Body = BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Ok().json(self)
    }
}
