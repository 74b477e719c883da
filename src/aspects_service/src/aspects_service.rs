use std::sync::Arc;

use aspects_adapters::config::AllowedOrigins;
use aspects_application::IssueGuestTokenUseCase;
use aspects_axum::{
    GUEST_TOKEN_ROUTE, guest_token, method_not_allowed, middleware::require_session,
};
use aspects_core::SessionValidator;
use axum::{
    Router,
    http::{HeaderValue, Method, request},
    middleware,
    routing::post,
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Guest token service exposing `POST {base_path}/courses/{course_id}/token`
pub struct AspectsService {
    router: Router,
}

impl AspectsService {
    /// Create a new AspectsService
    ///
    /// # Arguments
    /// * `use_case` - The configured guest token use case
    /// * `session_validator` - Resolves the session principal for every request
    /// * `base_path` - Path prefix the routes are mounted under, e.g. `/aspects`
    pub fn new<V>(use_case: IssueGuestTokenUseCase, session_validator: V, base_path: &str) -> Self
    where
        V: SessionValidator<RequestParts = request::Parts>,
    {
        let guest_token_routes = Router::new()
            .route(GUEST_TOKEN_ROUTE, post(guest_token).fallback(method_not_allowed))
            .route_layer(middleware::from_fn_with_state(
                session_validator,
                require_session::<V>,
            ))
            .with_state(Arc::new(use_case));

        let router = match normalize_base_path(base_path) {
            Some(base_path) => Router::new().nest(&base_path, guest_token_routes),
            None => Router::new().merge(guest_token_routes),
        };

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the AspectsService into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::POST])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Aspects service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

/// `aspects`, `/aspects` and `/aspects/` all mount under `/aspects`; an empty
/// or all-slash base path mounts at the root.
fn normalize_base_path(base_path: &str) -> Option<String> {
    let trimmed = base_path.trim_matches('/');
    (!trimmed.is_empty()).then(|| format!("/{trimmed}"))
}
