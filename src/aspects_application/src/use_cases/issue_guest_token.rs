use std::sync::Arc;

use aspects_core::{
    CatalogError, Course, CourseCatalog, CourseKey, CoursePermission, Dashboard, GuestToken,
    GuestTokenRequest, GuestTokenService, PermissionError, Principal, assemble_filters,
};

/// Error types specific to the guest token use case
#[derive(Debug, thiserror::Error)]
pub enum IssueGuestTokenError {
    #[error("Invalid course id: '{0}'")]
    InvalidCourseId(String),
    #[error("Course not found: '{0}'")]
    CourseNotFound(String),
    #[error("You do not have permission to perform this action.")]
    PermissionDenied,
    #[error("Course catalog error: {0}")]
    CatalogError(#[from] CatalogError),
    #[error("Permission error: {0}")]
    PermissionError(#[from] PermissionError),
    #[error(
        "Unable to fetch Superset guest token, mostly likely due to invalid settings.SUPERSET_CONFIG: {0}"
    )]
    GuestTokenUnavailable(String),
}

/// Issues a course-scoped guest token for the analytics backend.
///
/// Resolves the course, checks course-staff permission, assembles the
/// row-level-security filters and asks the token service for a token.
pub struct IssueGuestTokenUseCase {
    catalog: Option<Arc<dyn CourseCatalog>>,
    permission: Arc<dyn CoursePermission>,
    token_service: Arc<dyn GuestTokenService>,
    dashboards: Vec<Dashboard>,
    extra_filters: Vec<String>,
}

impl IssueGuestTokenUseCase {
    pub fn new(
        catalog: Option<Arc<dyn CourseCatalog>>,
        permission: Arc<dyn CoursePermission>,
        token_service: Arc<dyn GuestTokenService>,
        dashboards: Vec<Dashboard>,
        extra_filters: Vec<String>,
    ) -> Self {
        Self {
            catalog,
            permission,
            token_service,
            dashboards,
            extra_filters,
        }
    }

    /// Execute the guest token use case
    ///
    /// # Arguments
    /// * `principal` - The authenticated requesting user
    /// * `course_id` - Raw course identifier taken from the request path
    ///
    /// # Returns
    /// A freshly minted guest token
    #[tracing::instrument(name = "IssueGuestTokenUseCase::execute", skip(self, principal), fields(username = %principal.username()))]
    pub async fn execute(
        &self,
        principal: &Principal,
        course_id: &str,
    ) -> Result<GuestToken, IssueGuestTokenError> {
        let course = self.resolve_course(course_id).await?;

        if !self
            .permission
            .has_course_staff_access(principal, &course)
            .await?
        {
            tracing::warn!(course_id = %course.course_id(), "Course staff permission denied");
            return Err(IssueGuestTokenError::PermissionDenied);
        }

        if course.display_name().contains('\'') {
            tracing::warn!(
                course_id = %course.course_id(),
                "Course display name contains a single quote; course_name filter is passed unescaped"
            );
        }

        let request = GuestTokenRequest {
            principal: principal.clone(),
            filters: assemble_filters(&course, &self.extra_filters),
            course,
            dashboards: self.dashboards.clone(),
        };

        let guest_token = self
            .token_service
            .generate_guest_token(&request)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch guest token");
                IssueGuestTokenError::GuestTokenUnavailable(e.to_string())
            })?;

        if guest_token.is_empty() {
            tracing::error!("Analytics backend returned an empty guest token");
            return Err(IssueGuestTokenError::GuestTokenUnavailable(
                "empty guest token".to_string(),
            ));
        }

        Ok(guest_token)
    }

    /// Parse the course key and attach the catalog's display name, if a catalog is configured.
    async fn resolve_course(&self, course_id: &str) -> Result<Course, IssueGuestTokenError> {
        let course_key = course_id
            .parse::<CourseKey>()
            .map_err(|_| IssueGuestTokenError::InvalidCourseId(course_id.to_string()))?;

        let Some(catalog) = &self.catalog else {
            return Ok(Course::without_display_name(course_key));
        };

        let overview = catalog
            .find(&course_key)
            .await?
            .ok_or_else(|| IssueGuestTokenError::CourseNotFound(course_id.to_string()))?;

        Ok(Course::new(course_key, overview.display_name))
    }
}
