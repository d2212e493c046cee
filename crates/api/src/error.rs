//! API error types with HTTP response mapping.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{AuthError, DomainError};
use store::StoreError;
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body or a path parameter could not be read.
    #[error("{0}")]
    BadRequest(String),

    /// Domain logic error.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(err) => domain_status(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(error = %message, "internal server error");
        }

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Auth(AuthError::Forbidden) => StatusCode::FORBIDDEN,
        DomainError::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        DomainError::UserNotFound(_)
        | DomainError::UserIdNotFound(_)
        | DomainError::ItemNotFound(_)
        | DomainError::NoItemsNamed(_) => StatusCode::NOT_FOUND,
        DomainError::Validation(_)
        | DomainError::NoCart(_)
        | DomainError::Store(StoreError::DuplicateUsername(_)) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{ItemId, UserId};
    use domain::ValidationError;

    fn status_of(err: DomainError) -> StatusCode {
        ApiError::from(err).status()
    }

    #[test]
    fn test_auth_errors() {
        assert_eq!(status_of(AuthError::Forbidden.into()), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(AuthError::InvalidCredentials.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AuthError::Hashing("boom".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_errors() {
        for err in [
            DomainError::UserNotFound("bob".into()),
            DomainError::UserIdNotFound(UserId::new(7)),
            DomainError::ItemNotFound(ItemId::new(7)),
            DomainError::NoItemsNamed("Gizmo".into()),
        ] {
            assert_eq!(status_of(err), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn test_bad_request_errors() {
        for err in [
            DomainError::Validation(ValidationError::PasswordTooShort),
            DomainError::NoCart("bob".into()),
            DomainError::Store(StoreError::DuplicateUsername("bob".into())),
        ] {
            assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_store_failures_are_internal() {
        let err = DomainError::Store(StoreError::UserNotFound(UserId::new(1)));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
