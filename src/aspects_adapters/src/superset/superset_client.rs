use std::time::Duration;

use aspects_core::{GuestToken, GuestTokenError, GuestTokenRequest, GuestTokenService};
use reqwest::{Client, Url};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use super::filter_template::render_filter;
use crate::config::SupersetConfig;

/// Mints guest tokens through the Superset security API.
///
/// Each call logs in, fetches a CSRF token and requests the guest token.
/// Nothing is cached between calls.
pub struct SupersetClient {
    http_client: Client,
    config: SupersetConfig,
}

impl SupersetClient {
    pub fn new(config: SupersetConfig, http_client: Client) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// HTTP client with a cookie store, which Superset needs to tie the CSRF
    /// token to the login session.
    pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
        Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
    }

    fn base_url(&self) -> Result<Url, GuestTokenError> {
        let mut base = self.config.api_base_url().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Url::parse(&base).map_err(|e| request_failed("invalid Superset URL", e))
    }

    fn endpoint(&self, path: &str) -> Result<Url, GuestTokenError> {
        self.base_url()?
            .join(path)
            .map_err(|e| request_failed("invalid Superset URL", e))
    }

    #[tracing::instrument(name = "Superset login", skip_all)]
    async fn login(&self) -> Result<String, GuestTokenError> {
        let request_body = LoginRequest {
            username: &self.config.username,
            password: self.config.password.expose_secret(),
            provider: LOGIN_PROVIDER,
            refresh: true,
        };

        let response: LoginResponse = self
            .http_client
            .post(self.endpoint(LOGIN_PATH)?)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| request_failed("login", e))?
            .error_for_status()
            .map_err(|e| request_failed("login", e))?
            .json()
            .await
            .map_err(|e| request_failed("login", e))?;

        Ok(response.access_token)
    }

    #[tracing::instrument(name = "Superset CSRF token", skip_all)]
    async fn csrf_token(&self, access_token: &str) -> Result<String, GuestTokenError> {
        let response: CsrfTokenResponse = self
            .http_client
            .get(self.endpoint(CSRF_TOKEN_PATH)?)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| request_failed("csrf token", e))?
            .error_for_status()
            .map_err(|e| request_failed("csrf token", e))?
            .json()
            .await
            .map_err(|e| request_failed("csrf token", e))?;

        Ok(response.result)
    }
}

#[async_trait::async_trait]
impl GuestTokenService for SupersetClient {
    #[tracing::instrument(
        name = "Fetching Superset guest token",
        skip_all,
        fields(course_id = %request.course.course_id(), dashboards = request.dashboards.len())
    )]
    async fn generate_guest_token(
        &self,
        request: &GuestTokenRequest,
    ) -> Result<GuestToken, GuestTokenError> {
        let rls = request
            .filters
            .iter()
            .map(|filter| {
                render_filter(filter, &request.course, &request.principal)
                    .map(|clause| RlsClause { clause })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let resources = request
            .dashboards
            .iter()
            .map(|dashboard| Resource {
                kind: DASHBOARD_RESOURCE,
                id: &dashboard.uuid,
            })
            .collect();

        let request_body = GuestTokenBody {
            user: GuestUser {
                username: request.principal.username(),
            },
            resources,
            rls,
        };

        let access_token = self.login().await?;
        let csrf_token = self.csrf_token(&access_token).await?;

        let response: GuestTokenResponse = self
            .http_client
            .post(self.endpoint(GUEST_TOKEN_PATH)?)
            .bearer_auth(&access_token)
            .header(CSRF_HEADER, csrf_token)
            .header(reqwest::header::REFERER, self.base_url()?.as_str())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| request_failed("guest token", e))?
            .error_for_status()
            .map_err(|e| request_failed("guest token", e))?
            .json()
            .await
            .map_err(|e| request_failed("guest token", e))?;

        match response.token {
            Some(token) if !token.is_empty() => Ok(GuestToken::from(token)),
            _ => Err(GuestTokenError::MissingToken),
        }
    }
}

fn request_failed(step: &str, error: impl std::fmt::Display) -> GuestTokenError {
    GuestTokenError::RequestFailed(format!("{step}: {error}"))
}

const LOGIN_PATH: &str = "api/v1/security/login";
const CSRF_TOKEN_PATH: &str = "api/v1/security/csrf_token/";
const GUEST_TOKEN_PATH: &str = "api/v1/security/guest_token/";
const LOGIN_PROVIDER: &str = "db";
const DASHBOARD_RESOURCE: &str = "dashboard";
const CSRF_HEADER: &str = "X-CSRFToken";

#[derive(Serialize, Debug)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
    provider: &'a str,
    refresh: bool,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct CsrfTokenResponse {
    result: String,
}

#[derive(Serialize, Debug)]
struct GuestTokenBody<'a> {
    user: GuestUser<'a>,
    resources: Vec<Resource<'a>>,
    rls: Vec<RlsClause>,
}

#[derive(Serialize, Debug)]
struct GuestUser<'a> {
    username: &'a str,
}

#[derive(Serialize, Debug)]
struct Resource<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    id: &'a str,
}

#[derive(Serialize, Debug)]
struct RlsClause {
    clause: String,
}

#[derive(Deserialize)]
struct GuestTokenResponse {
    token: Option<String>,
}
