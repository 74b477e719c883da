pub mod hashmap_course_catalog;

pub use hashmap_course_catalog::HashMapCourseCatalog;
