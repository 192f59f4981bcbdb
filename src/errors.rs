use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

/// Field level validation messages collected before a request is rejected.
#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Validation {
    errors: BTreeMap<String, Vec<String>>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("validation failed")]
    Validation(Validation),
    #[error("{0} already registered")]
    Duplicate(&'static str),
    #[error("unable to authenticate with the provided credentials")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error("password hashing failed: {0}")]
    PasswordHash(argon2::password_hash::Error),
    #[error("{0}")]
    Internal(String),
}

impl From<Validation> for Error {
    fn from(validation: Validation) -> Self {
        Error::Validation(validation)
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(error: argon2::password_hash::Error) -> Self {
        Error::PasswordHash(error)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a BTreeMap<String, Vec<String>>>,
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Duplicate(_) | Self::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Database(_) | Self::PasswordHash(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Server side failures are logged in full but never leak details.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");

            "internal server error".to_string()
        } else {
            self.to_string()
        };

        let errors = match self {
            Self::Validation(validation) => Some(validation.fields()),
            _ => None,
        };

        HttpResponse::build(status).json(ErrorBody { message, errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_collects_messages_per_field() {
        let mut validation = Validation::new();

        assert!(validation.is_empty());

        validation.add("email", "Email address is not valid.");
        validation.add("password", "Password must be at least 6 characters.");
        validation.add("password", "Password field is required.");

        assert!(!validation.is_empty());
        assert_eq!(validation.fields()["password"].len(), 2);
    }

    #[test]
    fn status_codes_follow_the_error_taxonomy() {
        assert_eq!(
            Error::Validation(Validation::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::Duplicate("email").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            Error::InvalidCredentials.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(Error::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            Error::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            Error::Internal("boom".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_body_carries_field_errors() {
        let mut validation = Validation::new();
        validation.add("email", "Email address is not valid.");

        let response = Error::Validation(validation).error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_hide_their_cause() {
        let error = Error::Internal("connection pool exhausted".to_string());
        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
