use std::sync::Arc;

use aspects_adapters::{
    catalog::HashMapCourseCatalog,
    config::{AspectsServiceSetting, PluginSettings},
    permissions::{DenyAllPermission, StaticCourseStaffPermission},
    session::{JwtSessionConfig, JwtSessionValidator},
    superset::SupersetClient,
};
use aspects_application::IssueGuestTokenUseCase;
use aspects_core::{CourseCatalog, CoursePermission};

/// Wire the guest token use case from the loaded settings.
///
/// Without any configured staff every request is denied. Without a catalog the
/// service runs standalone with empty display names.
pub fn configure_guest_token_use_case(
    setting: &AspectsServiceSetting,
    plugin_settings: &PluginSettings,
) -> Result<IssueGuestTokenUseCase, reqwest::Error> {
    let http_client = SupersetClient::http_client(setting.superset_client.timeout())?;
    let token_service = SupersetClient::new(plugin_settings.superset_config.clone(), http_client);

    let permission: Arc<dyn CoursePermission> =
        if setting.global_staff.is_empty() && setting.course_staff.is_empty() {
            tracing::warn!("No course staff configured; all guest token requests will be denied");
            Arc::new(DenyAllPermission::new())
        } else {
            Arc::new(StaticCourseStaffPermission::from_settings(
                &setting.global_staff,
                &setting.course_staff,
            ))
        };

    let catalog = setting.catalog.as_deref().map(|entries| {
        Arc::new(HashMapCourseCatalog::from_entries(entries)) as Arc<dyn CourseCatalog>
    });

    Ok(IssueGuestTokenUseCase::new(
        catalog,
        permission,
        Arc::new(token_service),
        plugin_settings.dashboards(),
        plugin_settings.extra_filters_format.clone(),
    ))
}

pub fn configure_session_validator(setting: &AspectsServiceSetting) -> JwtSessionValidator {
    JwtSessionValidator::new(JwtSessionConfig::from(&setting.session))
}
