pub mod constants;
pub mod error;
pub mod plugin_settings;
pub mod settings;

pub use constants::*;
pub use error::ConfigurationError;
pub use plugin_settings::{
    ClickhouseBackendConfig, OverridePolicy, PluginSetting, PluginSettings, SettingsMap,
    SupersetConfig, resolve_setting,
};
pub use settings::{
    AllowedOrigins, ApplicationSetting, AspectsServiceSetting, CatalogEntry, CourseStaffGrant,
    SessionSetting, SupersetClientSetting, load_json_object,
};
