use health_assistant::config::AssistantConfig;
use health_assistant::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let otlp_endpoint = std::env::var("OTLP_ENDPOINT")
        .ok()
        .filter(|e| !e.trim().is_empty());
    init_tracing("health-assistant", "info", otlp_endpoint.as_deref());

    let config = AssistantConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
