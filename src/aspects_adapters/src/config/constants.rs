pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const SETTINGS_ENV_PREFIX: &str = "ASPECTS";
    pub const SETTINGS_ENV_SEPARATOR: &str = "__";
}

pub const DEFAULT_ENVIRONMENT: &str = "local";
pub const CONFIG_DIR: &str = "config";

pub const DEFAULT_SESSION_COOKIE_NAME: &str = "aspects_session";
pub const DEFAULT_BASE_PATH: &str = "/aspects";

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:8000";
    pub mod superset_client {
        pub const TIMEOUT_IN_MILLIS: u64 = 10_000;
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod superset_client {
        pub const TIMEOUT_IN_MILLIS: u64 = 2_000;
    }
}

pub const DEFAULT_INSTRUCTOR_DASHBOARD_UUID: &str = "1d6bf904-f53f-47fd-b1c9-6cd7e284d286";
