use annotate::Annotator;
use common::{TelemetryGuard, setup_logging};
use gateway::config::get_configuration;
use gateway::routes;
use gateway::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_configuration()?;

    let _telemetry = match config.otlp_endpoint.as_deref() {
        Some(endpoint) => Some(TelemetryGuard::init(
            "gateway",
            endpoint,
            config.environment,
        )?),
        None => {
            setup_logging(config.environment);
            None
        }
    };

    let annotator = match &config.font_path {
        Some(path) => {
            let annotator = Annotator::from_font_path(path)?;
            tracing::info!(font = %path.display(), "Label font loaded");
            annotator
        }
        None => {
            tracing::warn!("No label font configured; tags will be drawn without text");
            Annotator::new()
        }
    };

    let listen_addr = config.listen_addr.clone();
    let state = AppState::build(config, annotator);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    tracing::info!("Gateway listening on {}", listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
