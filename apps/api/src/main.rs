mod config;
mod editor;
mod errors;
mod layout;
mod models;
mod render;
mod routes;
mod state;
mod store;
mod templates;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::page_geometry;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{MemoryResumeStore, PgResumeStore, ResumeStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resumify API v{}", env!("CARGO_PKG_VERSION"));

    // Document store: PostgreSQL when configured, otherwise in-process memory
    let store: Arc<dyn ResumeStore> = match &config.database_url {
        Some(url) => {
            let store = PgResumeStore::connect(url).await?;
            info!("Document store: PostgreSQL");
            Arc::new(store)
        }
        None => {
            info!("Document store: in-memory (DATABASE_URL not set)");
            Arc::new(MemoryResumeStore::new())
        }
    };

    let page = page_geometry(config.paper);
    info!(
        "Page geometry: {:?} {}x{}pt",
        page.paper, page.width_pt, page.height_pt
    );

    let state = AppState {
        store,
        config: config.clone(),
        page,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
