use aspects_adapters::config::AspectsServiceSetting;
use aspects_service::{AspectsService, configure_guest_token_use_case, configure_session_validator};
use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Load configuration
    let config = AspectsServiceSetting::load()?;
    let plugin_settings = config.plugin_settings()?;

    let use_case = configure_guest_token_use_case(&config, &plugin_settings)?;
    let session_validator = configure_session_validator(&config);

    let service = AspectsService::new(use_case, session_validator, &config.application.base_path);

    let listener = tokio::net::TcpListener::bind(&config.application.address).await?;
    tracing::info!("Starting aspects guest token service...");

    service
        .run_standalone(listener, Some(config.application.allowed_origins.clone()))
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
