//! HTTP error mapping
//!
//! Every failure leaves the API as `{ "success": false, "message": ... }`.
//! Internal details are logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::common::{AuthError, DomainError};
use crate::domains::parents::RegistrationError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Registration(e) => match e {
                RegistrationError::InvalidRequest(_) | RegistrationError::InvalidCaringIdentifier => {
                    StatusCode::BAD_REQUEST
                }
                RegistrationError::DuplicateIdentity | RegistrationError::ChildAlreadyAdopted => {
                    StatusCode::CONFLICT
                }
                RegistrationError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                RegistrationError::DataIntegrityError { .. }
                | RegistrationError::StorageRejected(_)
                | RegistrationError::Credential(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(e) => match e {
                AuthError::AuthenticationRequired
                | AuthError::InvalidCredentials
                | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::PermissionDenied(_) => StatusCode::FORBIDDEN,
                AuthError::DatabaseError(_) | AuthError::InternalError(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Domain(e) => match e {
                DomainError::Invalid(_) => StatusCode::BAD_REQUEST,
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::Conflict(_) => StatusCode::CONFLICT,
                DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to show a client
    fn public_message(&self, status: StatusCode) -> String {
        match self {
            Self::Registration(RegistrationError::DataIntegrityError { .. }) => {
                "This Caring ID cannot be used; please contact the agency".to_string()
            }
            _ if status.is_server_error() => match status {
                StatusCode::SERVICE_UNAVAILABLE => {
                    "Service temporarily unavailable, please retry".to_string()
                }
                _ => "Internal server error".to_string(),
            },
            _ => self.to_string(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Domain(DomainError::Internal(e))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = ?self, "Request failed");
        }

        let body = json!({
            "success": false,
            "message": self.public_message(status),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_status_codes() {
        let cases = [
            (RegistrationError::InvalidRequest("x".into()), 400),
            (RegistrationError::DuplicateIdentity, 409),
            (RegistrationError::InvalidCaringIdentifier, 400),
            (RegistrationError::ChildAlreadyAdopted, 409),
            (RegistrationError::DataIntegrityError { matches: 2 }, 500),
            (RegistrationError::StorageUnavailable(sqlx::Error::PoolTimedOut), 503),
            (RegistrationError::StorageRejected(sqlx::Error::RowNotFound), 500),
            (RegistrationError::Credential(anyhow::anyhow!("boom")), 500),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status_code().as_u16(), expected);
        }
    }

    #[test]
    fn test_auth_status_codes() {
        assert_eq!(
            ApiError::from(AuthError::AuthenticationRequired).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AuthError::PermissionDenied("parent".into())).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AuthError::InvalidCredentials).status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let error = ApiError::from(DomainError::Internal(anyhow::anyhow!(
            "relation \"parents\" does not exist"
        )));
        let message = error.public_message(error.status_code());
        assert_eq!(message, "Internal server error");

        let error = ApiError::from(RegistrationError::StorageUnavailable(
            sqlx::Error::PoolTimedOut,
        ));
        let message = error.public_message(error.status_code());
        assert!(!message.contains("pool"));
    }

    #[test]
    fn test_user_errors_keep_their_message() {
        let error = ApiError::from(RegistrationError::ChildAlreadyAdopted);
        assert_eq!(
            error.public_message(error.status_code()),
            "This child is already adopted"
        );
    }
}
