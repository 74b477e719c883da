//! Axum integration for the guest token service.
//!
//! Routes use axum's extractors, call the `aspects_application` use case and
//! convert its results into JSON responses.
//!
//! # Usage
//!
//! ```ignore
//! use aspects_axum::{middleware::require_session, routes};
//!
//! let app = Router::new()
//!     .route(
//!         routes::GUEST_TOKEN_ROUTE,
//!         post(routes::guest_token).fallback(routes::method_not_allowed),
//!     )
//!     .route_layer(from_fn_with_state(validator, require_session::<JwtSessionValidator>))
//!     .with_state(use_case);
//! ```

pub mod middleware;
pub mod routes;

pub use routes::{
    CourseIdPath, GUEST_TOKEN_ROUTE, GuestTokenApiError, GuestTokenResponse, guest_token,
    method_not_allowed,
};
