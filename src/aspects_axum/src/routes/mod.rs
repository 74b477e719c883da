//! Axum-specific route handlers.

pub mod course_id;
pub mod error;
pub mod guest_token;

pub use course_id::{CourseIdPath, GUEST_TOKEN_ROUTE};
pub use error::{ErrorResponse, GuestTokenApiError};
pub use guest_token::{ALLOWED_METHODS, GuestTokenResponse, guest_token, method_not_allowed};
