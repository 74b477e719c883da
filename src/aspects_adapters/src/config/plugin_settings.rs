//! Plugin settings and their environment overrides.
//!
//! Each plugin setting has a compiled-in default that deployments may replace
//! through the `ENV_TOKENS` mapping. The override policy of every setting is
//! listed in [`PluginSetting::override_policy`]: two sink settings cannot be
//! resolved at all when no `ENV_TOKENS` mapping exists.

use aspects_core::Dashboard;
use secrecy::Secret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::{ConfigurationError, constants::DEFAULT_INSTRUCTOR_DASHBOARD_UUID};

pub type SettingsMap = serde_json::Map<String, Value>;

/// How a setting treats the `ENV_TOKENS` override mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverridePolicy {
    /// A missing mapping counts as an empty one.
    OptionalSource,
    /// A missing mapping is a fatal configuration error.
    RequiredSource,
    /// Never overridden; always the base value.
    BaseOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginSetting {
    SupersetConfig,
    InstructorDashboardUuid,
    ExtraFiltersFormat,
    ClickhouseBackendConfig,
    ClickhousePiiModels,
    InstructorDashboards,
}

impl PluginSetting {
    pub const ALL: [PluginSetting; 6] = [
        PluginSetting::SupersetConfig,
        PluginSetting::InstructorDashboardUuid,
        PluginSetting::ExtraFiltersFormat,
        PluginSetting::ClickhouseBackendConfig,
        PluginSetting::ClickhousePiiModels,
        PluginSetting::InstructorDashboards,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PluginSetting::SupersetConfig => "SUPERSET_CONFIG",
            PluginSetting::InstructorDashboardUuid => "ASPECTS_INSTRUCTOR_DASHBOARD_UUID",
            PluginSetting::ExtraFiltersFormat => "SUPERSET_EXTRA_FILTERS_FORMAT",
            PluginSetting::ClickhouseBackendConfig => "EVENT_SINK_CLICKHOUSE_BACKEND_CONFIG",
            PluginSetting::ClickhousePiiModels => "EVENT_SINK_CLICKHOUSE_PII_MODELS",
            PluginSetting::InstructorDashboards => "ASPECTS_INSTRUCTOR_DASHBOARDS",
        }
    }

    pub fn override_policy(self) -> OverridePolicy {
        match self {
            PluginSetting::SupersetConfig
            | PluginSetting::InstructorDashboardUuid
            | PluginSetting::ExtraFiltersFormat => OverridePolicy::OptionalSource,
            PluginSetting::ClickhouseBackendConfig | PluginSetting::ClickhousePiiModels => {
                OverridePolicy::RequiredSource
            }
            PluginSetting::InstructorDashboards => OverridePolicy::BaseOnly,
        }
    }

    fn default_value(self) -> Value {
        match self {
            PluginSetting::SupersetConfig => json!({
                "service_url": "http://superset.local.overhang.io:8088",
                "username": "superset",
                "password": "superset",
            }),
            PluginSetting::InstructorDashboardUuid => json!(DEFAULT_INSTRUCTOR_DASHBOARD_UUID),
            PluginSetting::ExtraFiltersFormat => json!([]),
            PluginSetting::ClickhouseBackendConfig => json!({
                "url": "http://clickhouse:8123",
                "username": "ch_cms",
                "password": "password",
                "database": "event_sink",
                "timeout_secs": 5,
            }),
            PluginSetting::ClickhousePiiModels => json!(["user_profile", "external_id"]),
            PluginSetting::InstructorDashboards => json!([{
                "name": "Instructor Dashboard",
                "slug": "instructor-dashboard",
                "uuid": DEFAULT_INSTRUCTOR_DASHBOARD_UUID,
            }]),
        }
    }
}

/// Resolve one setting: the override when the policy allows one and it is
/// present, the base value otherwise.
///
/// The base value must exist even when an override replaces it.
pub fn resolve_setting(
    setting: PluginSetting,
    base: &SettingsMap,
    env_tokens: Option<&SettingsMap>,
) -> Result<Value, ConfigurationError> {
    let name = setting.name();

    let overrides = match (setting.override_policy(), env_tokens) {
        (OverridePolicy::BaseOnly, _) => None,
        (OverridePolicy::RequiredSource, None) => {
            return Err(ConfigurationError::MissingOverrideSource(name));
        }
        (_, env_tokens) => env_tokens,
    };

    let base_value = base
        .get(name)
        .ok_or(ConfigurationError::MissingSetting(name))?;

    Ok(overrides
        .and_then(|tokens| tokens.get(name))
        .unwrap_or(base_value)
        .clone())
}

fn resolve_typed<T: DeserializeOwned>(
    setting: PluginSetting,
    base: &SettingsMap,
    env_tokens: Option<&SettingsMap>,
) -> Result<T, ConfigurationError> {
    let value = resolve_setting(setting, base, env_tokens)?;
    serde_json::from_value(value).map_err(|source| ConfigurationError::InvalidSetting {
        name: setting.name(),
        source,
    })
}

/// Connection parameters for the Superset API.
#[derive(Debug, Clone, Deserialize)]
pub struct SupersetConfig {
    #[serde(alias = "url")]
    pub service_url: String,
    /// Used instead of `service_url` for server-to-server calls when set.
    #[serde(default)]
    pub internal_service_url: Option<String>,
    pub username: String,
    pub password: Secret<String>,
}

impl SupersetConfig {
    pub fn api_base_url(&self) -> &str {
        self.internal_service_url
            .as_deref()
            .unwrap_or(&self.service_url)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClickhouseBackendConfig {
    pub url: String,
    pub username: String,
    pub password: Secret<String>,
    pub database: String,
    #[serde(default = "default_clickhouse_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_clickhouse_timeout_secs() -> u64 {
    5
}

/// Fully resolved plugin settings. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct PluginSettings {
    pub superset_config: SupersetConfig,
    pub instructor_dashboard_uuid: String,
    pub extra_filters_format: Vec<String>,
    pub clickhouse_backend_config: ClickhouseBackendConfig,
    pub clickhouse_pii_models: Vec<String>,
    pub instructor_dashboards: Vec<Dashboard>,
}

impl PluginSettings {
    /// Compiled-in base values for every plugin setting.
    pub fn defaults() -> SettingsMap {
        PluginSetting::ALL
            .into_iter()
            .map(|setting| (setting.name().to_string(), setting.default_value()))
            .collect()
    }

    #[tracing::instrument(name = "PluginSettings::resolve", skip_all, fields(has_env_tokens = env_tokens.is_some()))]
    pub fn resolve(
        base: &SettingsMap,
        env_tokens: Option<&SettingsMap>,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            superset_config: resolve_typed(PluginSetting::SupersetConfig, base, env_tokens)?,
            instructor_dashboard_uuid: resolve_typed(
                PluginSetting::InstructorDashboardUuid,
                base,
                env_tokens,
            )?,
            extra_filters_format: resolve_typed(
                PluginSetting::ExtraFiltersFormat,
                base,
                env_tokens,
            )?,
            clickhouse_backend_config: resolve_typed(
                PluginSetting::ClickhouseBackendConfig,
                base,
                env_tokens,
            )?,
            clickhouse_pii_models: resolve_typed(
                PluginSetting::ClickhousePiiModels,
                base,
                env_tokens,
            )?,
            instructor_dashboards: resolve_typed(
                PluginSetting::InstructorDashboards,
                base,
                env_tokens,
            )?,
        })
    }

    /// Dashboards a guest token grants access to.
    ///
    /// Falls back to the single `ASPECTS_INSTRUCTOR_DASHBOARD_UUID` dashboard
    /// when the dashboard list is empty.
    pub fn dashboards(&self) -> Vec<Dashboard> {
        if self.instructor_dashboards.is_empty() {
            vec![Dashboard::from_uuid(self.instructor_dashboard_uuid.clone())]
        } else {
            self.instructor_dashboards.clone()
        }
    }
}
