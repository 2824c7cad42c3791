use std::net::SocketAddr;
use std::sync::Arc;

use fraudscan::config::AppConfig;
use fraudscan::db::memory::MemoryStore;
use fraudscan::db::postgres::PgStore;
use fraudscan::db::ScanStore;
use fraudscan::services::engine::Engine;
use fraudscan::services::keywords::DetectionConfig;
use fraudscan::services::registry::PatternRegistry;
use fraudscan::services::threat_intel::ScammerTable;
use fraudscan::AppState;
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fraudscan=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = AppConfig::from_env()?;

    let detection = match &config.detection_rules_path {
        Some(path) => DetectionConfig::load(path)?,
        None => DetectionConfig::default(),
    };
    let registry = Arc::new(PatternRegistry::seeded());
    let engine = Engine::new(
        detection.keywords,
        registry,
        ScammerTable::new(detection.known_scammers),
    )?;

    let store: Arc<dyn ScanStore> = match &config.database_url {
        Some(url) => Arc::new(PgStore::connect(url, config.database_max_connections).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, scans are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let host: std::net::IpAddr = config.host.parse()?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(
        host = %addr,
        store = store.backend(),
        patterns = engine.registry().len(),
        "Starting fraudscan API server"
    );

    let state = AppState {
        engine: Arc::new(engine),
        store,
        config,
    };
    let app = fraudscan::routes::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
