use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    course::Course,
    course_key::CourseKey,
    guest_token::{GuestToken, GuestTokenRequest},
    principal::Principal,
};

// CourseCatalog port trait and errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOverview {
    pub display_name: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Course catalog unavailable: {0}")]
    Unavailable(String),
}

/// Optional lookup of course metadata.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    /// `Ok(None)` means the catalog has no course with this key.
    async fn find(&self, course_key: &CourseKey) -> Result<Option<CourseOverview>, CatalogError>;
}

// CoursePermission port trait and errors
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error("Permission check failed: {0}")]
    UnexpectedError(String),
}

/// Object-level permission check: is the principal staff or instructor on this course?
#[async_trait]
pub trait CoursePermission: Send + Sync {
    async fn has_course_staff_access(
        &self,
        principal: &Principal,
        course: &Course,
    ) -> Result<bool, PermissionError>;
}

// GuestTokenService port trait and errors
#[derive(Debug, Error)]
pub enum GuestTokenError {
    #[error("Invalid filter template '{template}': {reason}")]
    InvalidFilterTemplate { template: String, reason: String },
    #[error("Analytics backend request failed: {0}")]
    RequestFailed(String),
    #[error("Analytics backend returned no guest token")]
    MissingToken,
}

#[async_trait]
pub trait GuestTokenService: Send + Sync {
    async fn generate_guest_token(
        &self,
        request: &GuestTokenRequest,
    ) -> Result<GuestToken, GuestTokenError>;
}
