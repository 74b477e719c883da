use async_trait::async_trait;

use crate::domain::principal::Principal;

/// Trait for resolving the session principal in middleware.
///
/// Validators read the session credential from the request parts (headers,
/// method, URI, extensions) and verify it. The body is never needed.
#[async_trait]
pub trait SessionValidator: Clone + Send + Sync + 'static {
    /// The request parts type this validator operates on.
    ///
    /// Typically `http::request::Parts`.
    type RequestParts: Send + Sync;

    /// Errors that can occur during validation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Validate the session carried by the request parts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No session credential is present
    /// - The credential is invalid or expired
    async fn validate(&self, parts: &Self::RequestParts) -> Result<Principal, Self::Error>;
}
