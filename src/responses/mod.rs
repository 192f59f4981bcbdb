pub mod v1;

use serde::Serialize;
use utoipa::{IntoResponses, ToSchema};

// Documentation-only views of the error bodies rendered by the error type.

#[derive(Serialize, ToSchema, IntoResponses)]
#[response(status = 400, description = "Bad request")]
pub struct BadRequest {
    #[schema(example = "validation failed")]
    pub message: String,
}

#[derive(Serialize, ToSchema, IntoResponses)]
#[response(status = 401, description = "Unauthorized")]
pub struct Unauthorized {
    #[schema(example = "authentication required")]
    pub message: String,
}

#[derive(Serialize, ToSchema, IntoResponses)]
#[response(status = 405, description = "Method not allowed")]
pub struct MethodNotAllowed {
    #[schema(example = "method not allowed")]
    pub message: String,
}
