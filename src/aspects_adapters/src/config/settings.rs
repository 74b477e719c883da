use std::{path::Path, time::Duration};

use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use super::{
    ConfigurationError, PluginSettings, SettingsMap,
    constants::{
        CONFIG_DIR, DEFAULT_BASE_PATH, DEFAULT_ENVIRONMENT, DEFAULT_SESSION_COOKIE_NAME,
        env::{APP_ENVIRONMENT_ENV_VAR, SETTINGS_ENV_PREFIX, SETTINGS_ENV_SEPARATOR},
        prod,
    },
};

/// Service-level settings, loaded from `config/*.json` and `ASPECTS__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AspectsServiceSetting {
    #[serde(default)]
    pub application: ApplicationSetting,
    pub session: SessionSetting,
    #[serde(default)]
    pub superset_client: SupersetClientSetting,
    /// JSON file holding the `ENV_TOKENS` override mapping.
    #[serde(default)]
    pub env_tokens_path: Option<String>,
    /// JSON file whose entries replace the compiled-in plugin setting defaults.
    #[serde(default)]
    pub plugin_settings_path: Option<String>,
    #[serde(default)]
    pub global_staff: Vec<String>,
    #[serde(default)]
    pub course_staff: Vec<CourseStaffGrant>,
    /// Without a catalog the service runs standalone and display names are empty.
    #[serde(default)]
    pub catalog: Option<Vec<CatalogEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSetting {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_base_path")]
    pub base_path: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

impl Default for ApplicationSetting {
    fn default() -> Self {
        Self {
            address: default_address(),
            base_path: default_base_path(),
            allowed_origins: AllowedOrigins::default(),
        }
    }
}

fn default_address() -> String {
    prod::APP_ADDRESS.to_string()
}

fn default_base_path() -> String {
    DEFAULT_BASE_PATH.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSetting {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    pub secret: Secret<String>,
}

fn default_cookie_name() -> String {
    DEFAULT_SESSION_COOKIE_NAME.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupersetClientSetting {
    #[serde(default = "default_timeout_in_millis")]
    pub timeout_in_millis: u64,
}

impl SupersetClientSetting {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

impl Default for SupersetClientSetting {
    fn default() -> Self {
        Self {
            timeout_in_millis: default_timeout_in_millis(),
        }
    }
}

fn default_timeout_in_millis() -> u64 {
    prod::superset_client::TIMEOUT_IN_MILLIS
}

#[derive(Debug, Clone, Deserialize)]
pub struct CourseStaffGrant {
    pub username: String,
    pub course_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub course_id: String,
    pub display_name: String,
}

/// Origins allowed to call the service from a browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

impl AspectsServiceSetting {
    /// Load settings for the environment named by `APP_ENVIRONMENT`.
    pub fn load() -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_string());

        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("{CONFIG_DIR}/base")).required(false))
            .add_source(
                config::File::with_name(&format!("{CONFIG_DIR}/{environment}")).required(false),
            )
            .add_source(
                config::Environment::with_prefix(SETTINGS_ENV_PREFIX)
                    .prefix_separator(SETTINGS_ENV_SEPARATOR)
                    .separator(SETTINGS_ENV_SEPARATOR)
                    .list_separator(",")
                    .with_list_parse_key("global_staff")
                    .with_list_parse_key("application.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// The `ENV_TOKENS` override mapping, if this deployment supplies one.
    pub fn env_tokens(&self) -> Result<Option<SettingsMap>, ConfigurationError> {
        self.env_tokens_path
            .as_deref()
            .map(|path| load_json_object(path))
            .transpose()
    }

    /// Compiled-in defaults overlaid with the plugin settings file, if any.
    pub fn plugin_base_settings(&self) -> Result<SettingsMap, ConfigurationError> {
        let mut base = PluginSettings::defaults();
        if let Some(path) = self.plugin_settings_path.as_deref() {
            base.extend(load_json_object(path)?);
        }
        Ok(base)
    }

    /// Resolve the plugin settings against the `ENV_TOKENS` mapping.
    pub fn plugin_settings(&self) -> Result<PluginSettings, ConfigurationError> {
        let base = self.plugin_base_settings()?;
        let env_tokens = self.env_tokens()?;
        PluginSettings::resolve(&base, env_tokens.as_ref())
    }
}

/// Read a JSON file whose top level is an object.
pub fn load_json_object(path: impl AsRef<Path>) -> Result<SettingsMap, ConfigurationError> {
    let path = path.as_ref();
    let settings_file_error = |reason: String| ConfigurationError::SettingsFile {
        path: path.display().to_string(),
        reason,
    };

    let contents = std::fs::read_to_string(path).map_err(|e| settings_file_error(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| settings_file_error(e.to_string()))
}
