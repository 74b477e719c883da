use aspects_core::{Principal, SessionValidator};
use async_trait::async_trait;
use axum_extra::extract::CookieJar;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SessionSetting;

#[derive(Clone)]
pub struct JwtSessionConfig {
    pub cookie_name: String,
    pub secret: Secret<String>,
}

impl JwtSessionConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

impl From<&SessionSetting> for JwtSessionConfig {
    fn from(setting: &SessionSetting) -> Self {
        Self {
            cookie_name: setting.cookie_name.clone(),
            secret: setting.secret.clone(),
        }
    }
}

/// Resolves the session principal from a signed JWT session cookie.
#[derive(Clone)]
pub struct JwtSessionValidator {
    config: JwtSessionConfig,
}

impl JwtSessionValidator {
    pub fn new(config: JwtSessionConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    type RequestParts = http::request::Parts;
    type Error = SessionError;

    async fn validate(&self, parts: &Self::RequestParts) -> Result<Principal, Self::Error> {
        let cookie_jar = CookieJar::from_headers(&parts.headers);

        let token = cookie_jar
            .get(&self.config.cookie_name)
            .map(|cookie| cookie.value())
            .ok_or(SessionError::MissingSession)?;

        let claims = validate_session_token(token, &self.config)?;

        Ok(claims.into())
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Authentication credentials were not provided.")]
    MissingSession,
    #[error("Invalid session: {0}")]
    InvalidSession(jsonwebtoken::errors::Error),
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub uid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: usize,
}

impl From<SessionClaims> for Principal {
    fn from(claims: SessionClaims) -> Self {
        Principal::new(claims.uid, claims.sub, claims.email)
    }
}

// Check the session token signature and expiry using the session secret
fn validate_session_token(
    token: &str,
    config: &JwtSessionConfig,
) -> Result<SessionClaims, SessionError> {
    decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(SessionError::InvalidSession)
}

/// Sign a session token for `principal`, valid for `ttl_seconds`.
pub fn generate_session_token(
    principal: &Principal,
    ttl_seconds: i64,
    config: &JwtSessionConfig,
) -> Result<String, SessionError> {
    let delta = chrono::Duration::try_seconds(ttl_seconds).ok_or(SessionError::UnexpectedError(
        "Failed to create session duration".to_string(),
    ))?;

    let exp = Utc::now()
        .checked_add_signed(delta)
        .ok_or(SessionError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let exp: usize = exp
        .try_into()
        .map_err(|_| SessionError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

    let claims = SessionClaims {
        sub: principal.username().to_string(),
        uid: principal.user_id(),
        email: principal.email().map(str::to_string),
        exp,
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &EncodingKey::from_secret(config.as_bytes()),
    )
    .map_err(SessionError::InvalidSession)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, faker::internet::en::Username};
    use http::Request;

    fn session_config() -> JwtSessionConfig {
        JwtSessionConfig {
            cookie_name: "aspects_session".to_string(),
            secret: Secret::new("secret".to_owned()),
        }
    }

    fn parts_with_cookie(cookie: Option<String>) -> http::request::Parts {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header("cookie", cookie);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_valid_session_yields_principal() {
        let config = session_config();
        let username: String = Username().fake();
        let principal = Principal::new(42, username, Some("staff@example.com".to_string()));
        let token = generate_session_token(&principal, 600, &config).unwrap();

        let parts = parts_with_cookie(Some(format!("other=1; aspects_session={token}")));
        let validated = JwtSessionValidator::new(config)
            .validate(&parts)
            .await
            .unwrap();

        assert_eq!(validated, principal);
    }

    #[tokio::test]
    async fn test_missing_cookie() {
        let parts = parts_with_cookie(None);

        let result = JwtSessionValidator::new(session_config())
            .validate(&parts)
            .await;

        assert!(matches!(result, Err(SessionError::MissingSession)));
    }

    #[tokio::test]
    async fn test_token_signed_with_another_secret() {
        let principal = Principal::new(1, "staff", None);
        let other = JwtSessionConfig {
            cookie_name: "aspects_session".to_string(),
            secret: Secret::new("other-secret".to_owned()),
        };
        let token = generate_session_token(&principal, 600, &other).unwrap();

        let parts = parts_with_cookie(Some(format!("aspects_session={token}")));
        let result = JwtSessionValidator::new(session_config())
            .validate(&parts)
            .await;

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }

    #[tokio::test]
    async fn test_expired_session() {
        let config = session_config();
        let principal = Principal::new(1, "staff", None);
        let token = generate_session_token(&principal, -3600, &config).unwrap();

        let parts = parts_with_cookie(Some(format!("aspects_session={token}")));
        let result = JwtSessionValidator::new(config).validate(&parts).await;

        assert!(matches!(result, Err(SessionError::InvalidSession(_))));
    }
}
