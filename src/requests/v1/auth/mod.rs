use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Deserialize, Serialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequest {
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[schema(example = "password")]
    pub password: String,
}
