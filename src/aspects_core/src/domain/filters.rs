//! Row-level-security filter assembly.
//!
//! Values are interpolated verbatim. Quotes inside a display name are not
//! escaped, matching the filter grammar the analytics backend has always received.

use super::course::Course;

/// The three course-scoping filters, in `org`, `course_name`, `course_run` order.
pub fn built_in_filters(course: &Course) -> [String; 3] {
    [
        format!("org = '{}'", course.course_id().org()),
        format!("course_name = '{}'", course.display_name()),
        format!("course_run = '{}'", course.course_id().run()),
    ]
}

/// Built-in filters followed by the configured extra filters.
pub fn assemble_filters(course: &Course, extra_filters: &[String]) -> Vec<String> {
    built_in_filters(course)
        .into_iter()
        .chain(extra_filters.iter().cloned())
        .collect()
}
