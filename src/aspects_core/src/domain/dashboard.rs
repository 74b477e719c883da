use serde::{Deserialize, Serialize};

/// A pre-built analytics dashboard, referenced by the backend through its `uuid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    pub uuid: String,
}

impl Dashboard {
    pub fn from_uuid(uuid: impl Into<String>) -> Self {
        Self {
            name: None,
            slug: None,
            uuid: uuid.into(),
        }
    }
}
