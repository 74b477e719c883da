//! Course id extraction from the raw request path.
//!
//! Course ids may contain `/` (deprecated keys) and arbitrary percent
//! escapes, so the id is cut out of the undecoded path instead of going
//! through axum's `Path` extractor.

use aspects_application::IssueGuestTokenError;
use axum::{extract::FromRequestParts, http::request::Parts};

use super::error::GuestTokenApiError;

/// Route pattern for the guest token endpoint, relative to the base path.
pub const GUEST_TOKEN_ROUTE: &str = "/courses/{*course_path}";

const COURSES_PREFIX: &str = "/courses/";
const TOKEN_SUFFIX: &str = "/token";
const NOT_FOUND: &str = "Not found.";

/// Percent-decoded course id taken from `/courses/{course_id}/token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseIdPath(pub String);

impl<S> FromRequestParts<S> for CourseIdPath
where
    S: Send + Sync,
{
    type Rejection = GuestTokenApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .uri
            .path()
            .strip_prefix(COURSES_PREFIX)
            .and_then(|rest| rest.strip_suffix(TOKEN_SUFFIX))
            .ok_or_else(|| GuestTokenApiError::NotFound(NOT_FOUND.to_string()))?;

        let course_id = urlencoding::decode(raw).map_err(|_| {
            let error = IssueGuestTokenError::InvalidCourseId(raw.to_string());
            GuestTokenApiError::NotFound(error.to_string())
        })?;

        Ok(Self(course_id.into_owned()))
    }
}
