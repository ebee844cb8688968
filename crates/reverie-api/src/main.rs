//! Reverie API server entry point.

use std::error::Error;
use std::net::SocketAddr;

use reverie_api::config::Settings;
use reverie_api::state::AppState;
use reverie_content::{Script, build_catalog};
use reverie_stage::StageConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Reverie API server");

    let settings = Settings::from_env()?;

    let script = match &settings.script {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading script");
            Script::load(path)?
        }
        None => {
            tracing::info!("no REVERIE_SCRIPT set, using the bundled demo");
            Script::demo()?
        }
    };
    let catalog = build_catalog(&script)?;

    let config = StageConfig {
        reduced_motion: settings.reduced_motion,
        ..StageConfig::default()
    };
    let app_state = AppState::launch(catalog, config, settings.viewport);

    // TODO: Replace CorsLayer::permissive() with restricted origins once a
    // browser client is served from a fixed origin.
    let app = reverie_api::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
