use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserStoreRequest {
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[schema(example = "password")]
    pub password: String,
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
}

/// Partial update: absent fields are left untouched.
#[derive(Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateProfileRequest {
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    #[schema(example = "password")]
    pub password: Option<String>,
}
