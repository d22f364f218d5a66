use std::net::SocketAddr;
use std::sync::Arc;

use interview_tracker::{
    config::{init_config, Config, LogFormat},
    database::pool::{create_pool, run_migrations},
    middleware::cors::panel_cors,
    routes,
    services::interview_store::{InterviewStore, MemoryInterviewStore, PgInterviewStore},
    utils::time::SystemClock,
    AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn serve<S: InterviewStore + Clone>(store: S, config: &Config) -> anyhow::Result<()> {
    let app_state = AppState::from_config(store, Arc::new(SystemClock), config);

    if let Err(e) = app_state.interview_service.reload().await {
        tracing::warn!(error = ?e, "Initial interview load failed; starting with an empty list");
    }

    let app = routes::router(app_state)
        .layer(panel_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = init_config()?;
    init_tracing(config.log_format);

    match &config.database_url {
        Some(url) => {
            let pool = create_pool(url, config.database_max_connections).await?;
            run_migrations(&pool).await?;
            serve(PgInterviewStore::new(pool), config).await
        }
        None => {
            info!("DATABASE_URL is not set; keeping interviews in memory");
            serve(MemoryInterviewStore::new(), config).await
        }
    }
}
