use super::course_key::CourseKey;

/// Request-scoped view of a course: its key and the display name from the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    course_id: CourseKey,
    display_name: String,
}

impl Course {
    pub fn new(course_id: CourseKey, display_name: impl Into<String>) -> Self {
        Self {
            course_id,
            display_name: display_name.into(),
        }
    }

    /// Course with no catalog entry to draw a display name from.
    pub fn without_display_name(course_id: CourseKey) -> Self {
        Self::new(course_id, String::new())
    }

    pub fn course_id(&self) -> &CourseKey {
        &self.course_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
