//! # Aspects - Course-Scoped Analytics Guest Tokens
//!
//! Facade crate that re-exports the public APIs of the guest token service
//! components.
//!
//! ## Usage
//!
//! Add to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! aspects = { path = "../aspects" }
//! ```
//!
//! ## Structure
//!
//! - **Core domain types**: `CourseKey`, `Course`, `Principal`, `Dashboard`, `GuestToken`
//! - **Ports**: `CourseCatalog`, `CoursePermission`, `GuestTokenService`
//! - **Use case**: `IssueGuestTokenUseCase`
//! - **Adapters**: `SupersetClient`, `JwtSessionValidator`, `StaticCourseStaffPermission`, etc.
//! - **Service**: `AspectsService` - the router mounted under the configured base path

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use aspects_core::*;
}

pub use aspects_core::{
    Course, CourseKey, CourseKeyError, Dashboard, GuestToken, GuestTokenRequest, Principal,
    assemble_filters, built_in_filters,
};

// ============================================================================
// Ports
// ============================================================================

/// Collaborator traits the use case depends on
pub mod ports {
    pub use aspects_core::{
        CatalogError, CourseCatalog, CourseOverview, CoursePermission, GuestTokenError,
        GuestTokenService, PermissionError, SessionValidator,
    };
}

pub use ports::{CourseCatalog, CoursePermission, GuestTokenService, SessionValidator};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use aspects_application::*;
}

pub use aspects_application::{IssueGuestTokenError, IssueGuestTokenUseCase};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Course catalog implementations
    pub mod catalog {
        pub use aspects_adapters::catalog::*;
    }

    /// Configuration and plugin setting resolution
    pub mod config {
        pub use aspects_adapters::config::*;
    }

    /// Course staff permission implementations
    pub mod permissions {
        pub use aspects_adapters::permissions::*;
    }

    /// Session cookie validation
    pub mod session {
        pub use aspects_adapters::session::*;
    }

    /// Superset guest token client
    pub mod superset {
        pub use aspects_adapters::superset::*;
    }
}

pub use aspects_adapters::{
    catalog::HashMapCourseCatalog,
    permissions::{DenyAllPermission, StaticCourseStaffPermission},
    session::JwtSessionValidator,
    superset::SupersetClient,
};

// ============================================================================
// HTTP Layer
// ============================================================================

/// Axum handlers and middleware
pub mod http_api {
    pub use aspects_axum::*;
}

// ============================================================================
// Aspects Service (Main Entry Point)
// ============================================================================

/// Main guest token service
pub use aspects_service::{
    AspectsService, configure_guest_token_use_case, configure_session_validator,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
