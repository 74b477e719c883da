//! Session authentication middleware.

use aspects_core::SessionValidator;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::routes::GuestTokenApiError;

/// Resolve the session principal and store it as a request extension.
///
/// Requests without a valid session are rejected with `401 Unauthorized`
/// before reaching the route.
pub async fn require_session<V>(
    State(validator): State<V>,
    request: Request,
    next: Next,
) -> Result<Response, GuestTokenApiError>
where
    V: SessionValidator<RequestParts = http::request::Parts>,
{
    let (parts, body) = request.into_parts();

    let principal = validator.validate(&parts).await.map_err(|e| {
        tracing::debug!(error = %e, "Session validation failed");
        GuestTokenApiError::Unauthorized(e.to_string())
    })?;

    let mut request = Request::from_parts(parts, body);
    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
