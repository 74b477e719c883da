pub mod course;
pub mod course_key;
pub mod dashboard;
pub mod filters;
pub mod guest_token;
pub mod principal;
