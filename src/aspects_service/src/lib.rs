pub mod aspects_service;
pub mod helpers;
pub mod tracing;

pub use aspects_service::AspectsService;
pub use helpers::{configure_guest_token_use_case, configure_session_validator};
