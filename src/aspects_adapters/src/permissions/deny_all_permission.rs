use aspects_core::{Course, CoursePermission, PermissionError, Principal};

/// Grants nothing. Used when no permission backend is wired in.
#[derive(Debug, Clone, Default)]
pub struct DenyAllPermission;

impl DenyAllPermission {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl CoursePermission for DenyAllPermission {
    async fn has_course_staff_access(
        &self,
        _principal: &Principal,
        _course: &Course,
    ) -> Result<bool, PermissionError> {
        Ok(false)
    }
}
