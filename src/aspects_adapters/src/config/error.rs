use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{0} requires an ENV_TOKENS override source, but none was supplied")]
    MissingOverrideSource(&'static str),

    #[error("Setting {0} is not defined")]
    MissingSetting(&'static str),

    #[error("Invalid value for setting {name}: {source}")]
    InvalidSetting {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read settings file {path}: {reason}")]
    SettingsFile { path: String, reason: String },

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
