// rest/mod.rs — Public HTTP API server.
//
// Axum HTTP server, local only by default. Holds the list service behind
// AppContext and serves the browser client at the root.
//
// Endpoints:
//   GET    /list               full mapping
//   POST   /list?title=...     create item, returns {key, item}
//   DELETE /list?key=...       delete item, returns updated mapping
//   POST   /update-checkmark?key=...   toggle complete, returns updated mapping
//   GET    /health
//   GET    /                   embedded index page
//   *                          static files from config.static_dir, if set

pub mod routes;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

use crate::AppContext;

pub async fn start_rest_server(ctx: Arc<AppContext>) -> Result<()> {
    let addr: SocketAddr = ctx.config.bind().parse()?;

    let router = build_router(ctx);

    info!("todo API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let router = Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route(
            "/list",
            get(routes::get_list)
                .post(routes::create_item)
                .delete(routes::delete_item),
        )
        .route("/update-checkmark", post(routes::toggle_complete));

    // Extra client assets (bundles, stylesheets) come from the configured
    // static dir; the index page itself is embedded in the binary.
    let router = match &ctx.config.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.with_state(ctx)
}
