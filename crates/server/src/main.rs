//! Farm advisor server binary

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use farm_advisor_config::load_settings;
use farm_advisor_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = load_settings()?;
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    let state = AppState::new(settings).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("farm advisor listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}
