use anyhow::Context;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use climate_server::config::ServerConfig;
use climate_server::store::{InMemoryStore, SqliteStore};
use climate_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "climate_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("invalid configuration")?;

    // Fixture mode serves canned data without a database
    let state = match &config.fixture {
        Some(path) => {
            let store = InMemoryStore::from_json_file(path).context("failed to load fixture")?;
            AppState::new(store, config.query.clone())
        }
        None => {
            let store =
                SqliteStore::open(&config.database).context("failed to open climate database")?;
            AppState::new(store, config.query.clone())
        }
    };

    let app = create_router(state, config.request_timeout());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Climate API listening");
    info!("  GET  /                          - Available routes");
    info!("  GET  /health                    - Health check");
    info!("  GET  /api/v1.0/precipitation    - Last year's precipitation by date");
    info!("  GET  /api/v1.0/stations         - All stations");
    info!("  GET  /api/v1.0/tobs             - Last year's temperatures at the most active station");
    info!("  GET  /api/v1.0/<start>          - Temperature summary from YYYYMMDD");
    info!("  GET  /api/v1.0/<start>/<end>    - Temperature summary between two dates");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
