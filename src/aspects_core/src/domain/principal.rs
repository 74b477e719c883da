use serde::{Deserialize, Serialize};

/// The authenticated user a request is made on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    user_id: u64,
    username: String,
    email: Option<String>,
}

impl Principal {
    pub fn new(user_id: u64, username: impl Into<String>, email: Option<String>) -> Self {
        Self {
            user_id,
            username: username.into(),
            email,
        }
    }

    pub fn user_id(&self) -> u64 {
        self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
