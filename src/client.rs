//! HTTP client and view-model for the todo API.
//!
//! CLI subcommands (`todod list`, `todod add`, ...) use [`ApiClient`] to talk
//! to a running daemon. [`ListView`] layers the client-side state on top: the
//! local ordered cache of the list plus the in-progress draft title.
//!
//! Every mutation is server-confirmed: local state is replaced from the
//! server's response, never updated optimistically, so client and server
//! cannot silently diverge.

use anyhow::{Context as _, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::store::{TodoItem, TodoList};

/// Response body of a successful create.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedItem {
    pub key: String,
    pub item: TodoItem,
}

/// A thin reqwest wrapper over the daemon's HTTP API.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Client targeting a local daemon on the given port.
    pub fn new(port: u16) -> Self {
        Self::with_base_url(format!("http://127.0.0.1:{port}"))
    }

    /// Client targeting an explicit base URL (no trailing slash).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Check if the daemon is reachable.
    pub async fn is_reachable(&self) -> bool {
        let req = self.http.get(format!("{}/health", self.base_url)).send();
        matches!(
            tokio::time::timeout(std::time::Duration::from_secs(3), req).await,
            Ok(Ok(resp)) if resp.status().is_success()
        )
    }

    /// Fetch the full list.
    pub async fn fetch_list(&self) -> Result<TodoList> {
        let resp = self
            .http
            .get(format!("{}/list", self.base_url))
            .send()
            .await
            .context("failed to reach the todo daemon")?;
        Self::parse(resp).await
    }

    /// Create a new item; returns the item plus its server-assigned key.
    pub async fn create(&self, title: &str) -> Result<CreatedItem> {
        let resp = self
            .http
            .post(format!("{}/list", self.base_url))
            .query(&[("title", title)])
            .send()
            .await
            .context("failed to reach the todo daemon")?;
        Self::parse(resp).await
    }

    /// Delete an item; returns the updated list.
    pub async fn delete(&self, key: &str) -> Result<TodoList> {
        let resp = self
            .http
            .delete(format!("{}/list", self.base_url))
            .query(&[("key", key)])
            .send()
            .await
            .context("failed to reach the todo daemon")?;
        Self::parse(resp).await
    }

    /// Flip an item's `complete` flag; returns the updated list.
    pub async fn toggle(&self, key: &str) -> Result<TodoList> {
        let resp = self
            .http
            .post(format!("{}/update-checkmark", self.base_url))
            .query(&[("key", key)])
            .send()
            .await
            .context("failed to reach the todo daemon")?;
        Self::parse(resp).await
    }

    /// Decode a 2xx body, or surface the daemon's `{"error": ...}` message.
    async fn parse<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            return resp.json().await.context("invalid response body");
        }
        let body: Value = resp.json().await.unwrap_or_default();
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        anyhow::bail!("daemon error ({status}): {message}")
    }
}

/// Client-side state of the todo page: the cached list and the draft title
/// typed into the "new todo" input.
pub struct ListView {
    api: ApiClient,
    items: TodoList,
    draft_title: String,
}

impl ListView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            items: TodoList::new(),
            draft_title: String::new(),
        }
    }

    /// Fetch the full list and replace local state wholesale.
    pub async fn load(&mut self) -> Result<()> {
        self.items = self.api.fetch_list().await?;
        Ok(())
    }

    pub fn set_draft(&mut self, title: impl Into<String>) {
        self.draft_title = title.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft_title
    }

    /// Submit the draft as a new todo.
    ///
    /// A blank draft is a local no-op and is never sent to the server.
    /// On success the returned item is merged into the cache and the draft
    /// is cleared. Returns whether anything was submitted.
    pub async fn submit_draft(&mut self) -> Result<bool> {
        if self.draft_title.trim().is_empty() {
            return Ok(false);
        }
        let created = self.api.create(&self.draft_title).await?;
        self.items.insert(created.key, created.item);
        self.draft_title.clear();
        Ok(true)
    }

    /// Remove an item. Server-confirmed: the cache is only updated from the
    /// daemon's response.
    pub async fn remove(&mut self, key: &str) -> Result<()> {
        self.items = self.api.delete(key).await?;
        Ok(())
    }

    /// Toggle an item's checkmark. Server-confirmed, same as `remove`.
    pub async fn toggle(&mut self, key: &str) -> Result<()> {
        self.items = self.api.toggle(key).await?;
        Ok(())
    }

    /// Items in display (insertion) order.
    pub fn items(&self) -> impl Iterator<Item = (&String, &TodoItem)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
