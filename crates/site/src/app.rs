// crates/site/src/app.rs

use crate::router::build;
use crate::state::AppState;
use axum::body::Body;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing::info;

#[derive(Clone)]
pub struct RunCfg {
    pub addr: std::net::SocketAddr,
    pub state: AppState,
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

/// Serve until ctrl-c. `/blog/` and `/blog` are the same route; slashes are
/// trimmed before the router sees the path.
#[tracing::instrument(skip_all)]
pub async fn run(cfg: RunCfg) -> anyhow::Result<()> {
    let routes = build(cfg.state);
    let routes = NormalizePathLayer::trim_trailing_slash().layer(routes);
    let app = axum::ServiceExt::<axum::http::Request<Body>>::into_make_service(routes);

    let listener = tokio::net::TcpListener::bind(cfg.addr).await?;
    info!("listening on http://{}", cfg.addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
