//! Scrollyteller preview server entry point.

use std::error::Error;
use std::net::SocketAddr;

use scrollyteller_server::config::ServerConfig;
use scrollyteller_server::manifest::StoryManifest;
use scrollyteller_server::state::AppState;
use scrollyteller_server::{build_app, story};
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

    tracing::info!("Starting Scrollyteller preview server");

    let config = ServerConfig::from_env()?;

    // Load and render the story before accepting requests.
    let manifest = StoryManifest::load(&config.manifest_path).await?;
    let story = story::build_story(&manifest, config.story_root())?;
    let mut orchestrator = story.orchestrator;
    orchestrator.render().await?;

    let app_state = AppState::new(orchestrator, story.graphs, story.detector);
    let app = build_app(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
