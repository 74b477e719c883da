use aspects_adapters::config::{
    ApplicationSetting, AspectsServiceSetting, CatalogEntry, CourseStaffGrant, PluginSettings, SessionSetting,
    SettingsMap, SupersetClientSetting, constants::test,
};
use aspects_adapters::session::{JwtSessionConfig, generate_session_token};
use aspects_core::Principal;
use aspects_service::{AspectsService, configure_guest_token_use_case, configure_session_validator};
use secrecy::Secret;
use serde_json::json;
use wiremock::MockServer;

pub const SESSION_COOKIE_NAME: &str = "aspects_session";
pub const COURSE_ID: &str = "course-v1:Org+101+2024";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub superset_server: MockServer,
    pub session_config: JwtSessionConfig,
}

#[derive(Default)]
pub struct TestAppOptions {
    pub course_staff: Vec<CourseStaffGrant>,
    pub catalog: Option<Vec<CatalogEntry>>,
    pub extra_filters: Vec<String>,
    pub base_path: Option<String>,
}

impl TestAppOptions {
    pub fn with_staff(username: &str) -> Self {
        Self::with_staff_on(username, COURSE_ID)
    }

    pub fn with_staff_on(username: &str, course_id: &str) -> Self {
        Self {
            course_staff: vec![CourseStaffGrant {
                username: username.to_string(),
                course_ids: vec![course_id.to_string()],
            }],
            ..Default::default()
        }
    }
}

impl TestApp {
    pub async fn new(options: TestAppOptions) -> Self {
        let superset_server = MockServer::start().await;

        let setting = AspectsServiceSetting {
            application: ApplicationSetting {
                base_path: options
                    .base_path
                    .unwrap_or_else(|| ApplicationSetting::default().base_path),
                ..Default::default()
            },
            session: SessionSetting {
                cookie_name: SESSION_COOKIE_NAME.to_string(),
                secret: Secret::new("test-session-secret".to_string()),
            },
            superset_client: SupersetClientSetting {
                timeout_in_millis: test::superset_client::TIMEOUT_IN_MILLIS,
            },
            env_tokens_path: None,
            plugin_settings_path: None,
            global_staff: vec![],
            course_staff: options.course_staff,
            catalog: options.catalog,
        };

        let env_tokens: SettingsMap = serde_json::from_value(json!({
            "SUPERSET_CONFIG": {
                "service_url": superset_server.uri(),
                "username": "superset",
                "password": "superset",
            },
            "SUPERSET_EXTRA_FILTERS_FORMAT": options.extra_filters,
        }))
        .expect("Failed to build ENV_TOKENS");

        let plugin_settings =
            PluginSettings::resolve(&PluginSettings::defaults(), Some(&env_tokens))
                .expect("Failed to resolve plugin settings");

        let use_case = configure_guest_token_use_case(&setting, &plugin_settings)
            .expect("Failed to configure use case");
        let session_validator = configure_session_validator(&setting);
        let service =
            AspectsService::new(use_case, session_validator, &setting.application.base_path);

        let listener = tokio::net::TcpListener::bind(test::APP_ADDRESS)
            .await
            .expect("Failed to bind listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: reqwest::Client::new(),
            superset_server,
            session_config: JwtSessionConfig::from(&setting.session),
        }
    }

    pub fn session_cookie(&self, username: &str) -> String {
        let principal = Principal::new(11, username, None);
        let token = generate_session_token(&principal, 600, &self.session_config)
            .expect("Failed to sign session token");
        format!("{SESSION_COOKIE_NAME}={token}")
    }

    pub fn token_url(&self, course_id: &str) -> String {
        format!("{}/aspects/courses/{}/token", self.address, course_id)
    }

    pub async fn post_guest_token(
        &self,
        course_id: &str,
        username: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self.http_client.post(self.token_url(course_id));
        if let Some(username) = username {
            request = request.header("cookie", self.session_cookie(username));
        }
        request.send().await.expect("Failed to execute request.")
    }
}
