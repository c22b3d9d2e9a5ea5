use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use common::utils::logging::init_logging_default;
use configs::Config;
use service::polls::PollService;
use service::storage::snapshot_store::SnapshotStore;

use crate::auth::AppState;
use crate::routes;

/// Public entry: load configuration, open the store, and serve.
///
/// A malformed data file is fatal here: the process refuses to start
/// rather than discard the snapshot.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_default();

    let config = Config::load();

    let store = SnapshotStore::open(&config.data_file_path).await?;
    let polls = Arc::new(PollService::new(store));
    let state = AppState { polls };

    let app: Router = routes::build_router(state, CorsLayer::very_permissive());

    let addr = &config.server_address;
    info!(%addr, "starting poll server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
