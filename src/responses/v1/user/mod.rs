use actix_web::body::BoxBody;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoResponses, ToSchema};

/// Public view of a user. The password hash never appears here.
#[derive(
    Clone, Debug, Serialize, Deserialize, ToSchema, IntoResponses, PartialEq, Eq, Hash,
)]
#[response(status = 200, description = "OK")]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[schema(example = "Jane Doe")]
    pub name: String,
}

impl Responder for User {
    type Body = BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Ok().json(self)
    }
}

/// Same body as [`User`], answered with 201 by the create operation.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, IntoResponses)]
#[response(status = 201, description = "Created")]
#[serde(transparent)]
pub struct Registered(pub User);

impl Responder for Registered {
    type Body = BoxBody;

    fn respond_to(self, _: &HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::Created().json(self)
    }
}
