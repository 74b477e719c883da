pub mod domain;
pub mod ports;
pub mod strategies;

// Re-export commonly used types for convenience
pub use domain::{
    course::Course,
    course_key::{CourseKey, CourseKeyError},
    dashboard::Dashboard,
    filters::{assemble_filters, built_in_filters},
    guest_token::{GuestToken, GuestTokenRequest},
    principal::Principal,
};

pub use ports::services::{
    CatalogError, CourseCatalog, CourseOverview, CoursePermission, GuestTokenError,
    GuestTokenService, PermissionError,
};

pub use strategies::session_validator::SessionValidator;
