use aspects_application::IssueGuestTokenError;
use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::guest_token::ALLOWED_METHODS;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum GuestTokenApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Method \"{0}\" not allowed.")]
    MethodNotAllowed(String),

    #[error("{0}")]
    ImproperlyConfigured(String),

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for GuestTokenApiError {
    fn into_response(self) -> Response {
        let status_code = match self {
            GuestTokenApiError::NotFound(_) => StatusCode::NOT_FOUND,
            GuestTokenApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            GuestTokenApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GuestTokenApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            GuestTokenApiError::ImproperlyConfigured(_)
            | GuestTokenApiError::UnexpectedError(_) => {
                tracing::error!(error = %self, "Guest token request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let allow_header = matches!(self, GuestTokenApiError::MethodNotAllowed(_));

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        if allow_header {
            (status_code, [(header::ALLOW, ALLOWED_METHODS)], body).into_response()
        } else {
            (status_code, body).into_response()
        }
    }
}

impl From<IssueGuestTokenError> for GuestTokenApiError {
    fn from(error: IssueGuestTokenError) -> Self {
        match error {
            IssueGuestTokenError::InvalidCourseId(_) | IssueGuestTokenError::CourseNotFound(_) => {
                GuestTokenApiError::NotFound(error.to_string())
            }
            IssueGuestTokenError::PermissionDenied => {
                GuestTokenApiError::Forbidden(error.to_string())
            }
            IssueGuestTokenError::GuestTokenUnavailable(_) => {
                GuestTokenApiError::ImproperlyConfigured(error.to_string())
            }
            IssueGuestTokenError::CatalogError(_) | IssueGuestTokenError::PermissionError(_) => {
                GuestTokenApiError::UnexpectedError(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aspects_core::PermissionError;

    async fn status_and_message(error: GuestTokenApiError) -> (StatusCode, String) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        (status, body.error)
    }

    #[tokio::test]
    async fn test_invalid_course_id_is_not_found() {
        let error = IssueGuestTokenError::InvalidCourseId("bogus".to_string());

        let (status, message) = status_and_message(error.into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "Invalid course id: 'bogus'");
    }

    #[tokio::test]
    async fn test_permission_denied_is_forbidden() {
        let (status, _) = status_and_message(IssueGuestTokenError::PermissionDenied.into()).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_internal_error_with_detail() {
        let error = IssueGuestTokenError::GuestTokenUnavailable("boom".to_string());

        let (status, message) = status_and_message(error.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(message.contains("boom"));
        assert!(message.contains("SUPERSET_CONFIG"));
    }

    #[tokio::test]
    async fn test_permission_backend_failure_is_internal_error() {
        let error = IssueGuestTokenError::PermissionError(PermissionError::UnexpectedError(
            "down".to_string(),
        ));

        let (status, _) = status_and_message(error.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_method_not_allowed_sets_allow_header() {
        let response = GuestTokenApiError::MethodNotAllowed("GET".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.headers().get(header::ALLOW).unwrap(),
            ALLOWED_METHODS
        );
    }
}
