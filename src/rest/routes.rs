// rest/routes.rs — Todo list route handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

use crate::store::{StoreError, TodoList};
use crate::AppContext;

/// Embedded single-page browser client.
const INDEX_HTML: &str = include_str!("../../assets/index.html");

type ApiError = (StatusCode, Json<Value>);

fn error_response(err: StoreError) -> ApiError {
    let status = match err {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::EmptyTitle => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    let uptime = ctx.started_at.elapsed().as_secs();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": uptime,
        "items": ctx.store.len().await,
    }))
}

pub async fn get_list(State(ctx): State<Arc<AppContext>>) -> Json<TodoList> {
    Json(ctx.store.snapshot().await)
}

#[derive(Deserialize)]
pub struct CreateParams {
    #[serde(default)]
    pub title: String,
}

/// POST /list?title=... returns the created item plus its key rather than
/// the full mapping; clients merge it into their local copy.
pub async fn create_item(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<CreateParams>,
) -> Result<Json<Value>, ApiError> {
    let (key, item) = ctx
        .store
        .create(&params.title)
        .await
        .map_err(error_response)?;
    debug!(key = %key, title = %item.title, "todo created");
    Ok(Json(json!({ "key": key, "item": item })))
}

#[derive(Deserialize)]
pub struct KeyParams {
    #[serde(default)]
    pub key: String,
}

/// DELETE /list?key=... is idempotent; an absent key still returns 200 with
/// the (unchanged) mapping.
pub async fn delete_item(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<KeyParams>,
) -> Json<TodoList> {
    let list = ctx.store.delete(&params.key).await;
    debug!(key = %params.key, remaining = list.len(), "todo deleted");
    Json(list)
}

/// POST /update-checkmark?key=... answers 404 on an unknown key; the
/// process keeps serving.
pub async fn toggle_complete(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<KeyParams>,
) -> Result<Json<TodoList>, ApiError> {
    let list = ctx
        .store
        .toggle(&params.key)
        .await
        .map_err(error_response)?;
    debug!(key = %params.key, "todo toggled");
    Ok(Json(list))
}
