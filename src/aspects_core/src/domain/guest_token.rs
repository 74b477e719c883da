use secrecy::{ExposeSecret, Secret};

use super::{course::Course, dashboard::Dashboard, principal::Principal};

/// Opaque short-lived credential minted by the analytics backend.
#[derive(Debug, Clone)]
pub struct GuestToken(Secret<String>);

impl GuestToken {
    pub fn new(token: Secret<String>) -> Self {
        Self(token)
    }

    pub fn is_empty(&self) -> bool {
        self.0.expose_secret().is_empty()
    }
}

impl AsRef<Secret<String>> for GuestToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

impl From<String> for GuestToken {
    fn from(token: String) -> Self {
        Self(Secret::new(token))
    }
}

/// Everything the token service needs to mint one guest token.
#[derive(Debug, Clone)]
pub struct GuestTokenRequest {
    pub principal: Principal,
    pub course: Course,
    pub dashboards: Vec<Dashboard>,
    pub filters: Vec<String>,
}
