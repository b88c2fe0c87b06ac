use bijak::server::{AppConfig, Application, telemetry::init_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {e}");
        std::io::Error::other(format!("Configuration error: {e}"))
    })?;

    init_tracing(&config.log_level, config.log_format);

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start server: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    application.run_until_stopped().await
}
