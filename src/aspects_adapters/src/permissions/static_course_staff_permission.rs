use std::{collections::HashSet, sync::Arc};

use aspects_core::{Course, CourseKey, CoursePermission, PermissionError, Principal};
use dashmap::{DashMap, DashSet};

use crate::config::CourseStaffGrant;

/// In-memory course staff grants keyed by username.
///
/// Global staff pass the check for every course.
#[derive(Default, Clone)]
pub struct StaticCourseStaffPermission {
    grants: Arc<DashMap<String, HashSet<CourseKey>>>,
    global_staff: Arc<DashSet<String>>,
}

impl StaticCourseStaffPermission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configured grants. Invalid course ids are skipped with a warning.
    pub fn from_settings(global_staff: &[String], course_staff: &[CourseStaffGrant]) -> Self {
        let permission = Self::new();

        for username in global_staff {
            permission.add_global_staff(username.clone());
        }

        for grant in course_staff {
            for course_id in &grant.course_ids {
                match course_id.parse::<CourseKey>() {
                    Ok(course_key) => permission.grant(grant.username.clone(), course_key),
                    Err(_) => tracing::warn!(
                        username = %grant.username,
                        course_id = %course_id,
                        "Skipping course staff grant with invalid course id"
                    ),
                }
            }
        }

        permission
    }

    pub fn grant(&self, username: String, course_key: CourseKey) {
        self.grants
            .entry(username)
            .or_default()
            .insert(course_key.for_branch_and_version_free());
    }

    pub fn revoke(&self, username: &str, course_key: &CourseKey) {
        if let Some(mut courses) = self.grants.get_mut(username) {
            courses.remove(&course_key.for_branch_and_version_free());
        }
    }

    pub fn add_global_staff(&self, username: String) {
        self.global_staff.insert(username);
    }
}

#[async_trait::async_trait]
impl CoursePermission for StaticCourseStaffPermission {
    async fn has_course_staff_access(
        &self,
        principal: &Principal,
        course: &Course,
    ) -> Result<bool, PermissionError> {
        if self.global_staff.contains(principal.username()) {
            return Ok(true);
        }

        let course_key = course.course_id().for_branch_and_version_free();
        Ok(self
            .grants
            .get(principal.username())
            .is_some_and(|courses| courses.contains(&course_key)))
    }
}
