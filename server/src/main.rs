//! coil-field server - interactive bifilar coil session
//! - Controls over WebSocket (set / reset / load)
//! - Full field recompute on every change
//! - Binary curve streaming to all viewers
//! - Optional params file watcher

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use coil_field::SessionConfig;
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::Arc,
};
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::{error, info};

mod api;
mod session;
mod socket;
mod watch;

use session::AppState;

#[derive(Parser, Debug)]
#[command(name = "coil-field-server")]
#[command(about = "Serve an interactive bifilar coil field session")]
#[command(version)]
struct Args {
    /// JSON params file to load and watch for changes
    params_file: Option<PathBuf>,

    /// JSON session config (grid, initial params, summation)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port
    #[arg(long, default_value = "3001")]
    port: u16,

    /// Directory with the viewer front end
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

pub(crate) fn router(state: Arc<AppState>, static_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/ws", get(socket::ws_handler))
        .route("/api/params", get(api::get_params))
        .route("/api/curve", get(api::get_curve))
        .route("/api/panel", get(api::get_panel))
        .route("/api/reset", post(api::post_reset))
        .route("/api/event", post(api::post_event))
        .layer(CorsLayer::permissive())
        .with_state(state);

    match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => SessionConfig::default(),
    };

    // An existing params file is the session's starting point (and reset target)
    if let Some(path) = args.params_file.as_deref().filter(|p| p.exists()) {
        match watch::read_params_file(path).await {
            Ok(params) => config.params = params,
            Err(e) => error!("{:#}", e),
        }
    }

    info!(
        "Grid: {} samples over [{}, {}] m, summation={:?}",
        config.grid.samples, config.grid.z_min, config.grid.z_max, config.summation
    );

    let state = Arc::new(AppState::new(&config)?);

    if let Some(path) = args.params_file.clone() {
        info!("Watching: {:?}", path);
        let watch_state = state.clone();
        tokio::spawn(async move {
            if let Err(e) = watch::watch_params_file(path, watch_state).await {
                error!("Watcher stopped: {:#}", e);
            }
        });
    }

    let app = router(state, args.static_dir.as_deref());

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("Server: http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
