use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use aspects_core::{CatalogError, CourseCatalog, CourseKey, CourseOverview};

use crate::config::CatalogEntry;

#[derive(Default, Clone)]
pub struct HashMapCourseCatalog {
    courses: Arc<RwLock<HashMap<CourseKey, String>>>,
}

impl HashMapCourseCatalog {
    pub fn new() -> Self {
        Self {
            courses: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Build from configured entries. Invalid course ids are skipped with a warning.
    pub fn from_entries(entries: &[CatalogEntry]) -> Self {
        let courses = entries
            .iter()
            .filter_map(|entry| match entry.course_id.parse::<CourseKey>() {
                Ok(course_key) => Some((
                    course_key.for_branch_and_version_free(),
                    entry.display_name.clone(),
                )),
                Err(_) => {
                    tracing::warn!(
                        course_id = %entry.course_id,
                        "Skipping catalog entry with invalid course id"
                    );
                    None
                }
            })
            .collect();

        Self {
            courses: Arc::new(RwLock::new(courses)),
        }
    }

    pub async fn add_course(&self, course_key: CourseKey, display_name: String) {
        let mut courses = self.courses.write().await;
        courses.insert(course_key.for_branch_and_version_free(), display_name);
    }
}

#[async_trait::async_trait]
impl CourseCatalog for HashMapCourseCatalog {
    async fn find(&self, course_key: &CourseKey) -> Result<Option<CourseOverview>, CatalogError> {
        let courses = self.courses.read().await;
        Ok(courses
            .get(&course_key.for_branch_and_version_free())
            .map(|display_name| CourseOverview {
                display_name: display_name.clone(),
            }))
    }
}
