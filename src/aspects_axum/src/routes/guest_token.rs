//! Axum guest token route.

use std::sync::Arc;

use aspects_application::IssueGuestTokenUseCase;
use aspects_core::Principal;
use axum::{
    Extension, Json,
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::{course_id::CourseIdPath, error::GuestTokenApiError};

pub const ALLOWED_METHODS: &str = "POST, OPTIONS, HEAD";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestTokenResponse {
    pub guest_token: String,
}

/// Issue a Superset guest token scoped to the course in the path.
///
/// Expects the session middleware to have stored the `Principal` extension.
#[tracing::instrument(name = "Guest Token", skip(use_case, principal))]
pub async fn guest_token(
    State(use_case): State<Arc<IssueGuestTokenUseCase>>,
    Extension(principal): Extension<Principal>,
    CourseIdPath(course_id): CourseIdPath,
) -> Result<Json<GuestTokenResponse>, GuestTokenApiError> {
    let guest_token = use_case.execute(&principal, &course_id).await?;

    Ok(Json(GuestTokenResponse {
        guest_token: guest_token.as_ref().expose_secret().clone(),
    }))
}

/// Fallback for every method the route does not handle.
///
/// `OPTIONS` describes the endpoint; anything else is `405`.
pub async fn method_not_allowed(method: Method) -> Response {
    if method == Method::OPTIONS {
        return (
            StatusCode::OK,
            [(header::ALLOW, ALLOWED_METHODS)],
            Json(serde_json::json!({
                "name": "Superset Guest Token",
                "renders": ["application/json"],
            })),
        )
            .into_response();
    }

    GuestTokenApiError::MethodNotAllowed(method.to_string()).into_response()
}
