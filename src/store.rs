//! The list service: authoritative in-memory todo list.
//!
//! Owns the ordered key -> item mapping behind a `tokio::sync::RwLock` so
//! that every read-modify-write is atomic under axum's parallel request
//! handling. Keys come from a monotonic counter held inside the same lock,
//! so they are collision-free and never reused.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

/// A single todo entry. `title` is set at creation and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub title: String,
    pub complete: bool,
}

/// Ordered mapping from opaque key to item. Insertion order is display order.
pub type TodoList = IndexMap<String, TodoItem>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no todo item with key '{0}'")]
    NotFound(String),
    #[error("todo title must not be empty")]
    EmptyTitle,
}

struct ListInner {
    items: TodoList,
    /// Next key to hand out. Deletion never rewinds this.
    next_key: u64,
}

/// The authoritative todo list for the daemon's lifetime.
pub struct TodoStore {
    inner: RwLock<ListInner>,
}

impl TodoStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ListInner {
                items: IndexMap::new(),
                next_key: 1,
            }),
        }
    }

    /// A store pre-populated with the demo items (3 complete, 2 incomplete).
    pub fn seeded() -> Self {
        let seed: [(&str, bool); 5] = [
            ("Pay rent", true),
            ("Water the plants", true),
            ("Renew passport", true),
            ("Buy groceries", false),
            ("Call the dentist", false),
        ];

        let mut items = IndexMap::new();
        for (n, (title, complete)) in seed.into_iter().enumerate() {
            items.insert(
                (n as u64 + 1).to_string(),
                TodoItem {
                    title: title.to_string(),
                    complete,
                },
            );
        }
        let next_key = items.len() as u64 + 1;

        Self {
            inner: RwLock::new(ListInner { items, next_key }),
        }
    }

    /// Full ordered copy of the current list. Always succeeds.
    pub async fn snapshot(&self) -> TodoList {
        self.inner.read().await.items.clone()
    }

    /// Number of items currently in the list.
    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    /// Insert a new incomplete item and return its key and contents.
    ///
    /// The store is the authoritative validation point: a title that trims
    /// to empty is rejected here regardless of what clients check locally.
    pub async fn create(&self, title: &str) -> Result<(String, TodoItem), StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }

        let mut inner = self.inner.write().await;
        let key = inner.next_key.to_string();
        inner.next_key += 1;

        let item = TodoItem {
            title: title.to_string(),
            complete: false,
        };
        inner.items.insert(key.clone(), item.clone());
        Ok((key, item))
    }

    /// Remove `key` if present. Deleting an absent key is an idempotent
    /// no-op. Returns the updated list either way.
    pub async fn delete(&self, key: &str) -> TodoList {
        let mut inner = self.inner.write().await;
        // shift_remove keeps the remaining items in insertion order.
        inner.items.shift_remove(key);
        inner.items.clone()
    }

    /// Flip the `complete` flag of `key` and return the updated list.
    ///
    /// Unknown keys report `NotFound` instead of faulting the process.
    pub async fn toggle(&self, key: &str) -> Result<TodoList, StoreError> {
        let mut inner = self.inner.write().await;
        let item = inner
            .items
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
        item.complete = !item.complete;
        Ok(inner.items.clone())
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_store_has_five_items_three_complete() {
        let store = TodoStore::seeded();
        let list = store.snapshot().await;
        assert_eq!(list.len(), 5);
        assert_eq!(list.values().filter(|i| i.complete).count(), 3);
    }

    #[tokio::test]
    async fn create_returns_fresh_key_and_incomplete_item() {
        let store = TodoStore::new();
        let before = store.snapshot().await;

        let (key, item) = store.create("Buy milk").await.unwrap();
        assert!(!before.contains_key(&key));
        assert!(!item.complete);
        assert_eq!(item.title, "Buy milk");

        let after = store.snapshot().await;
        assert_eq!(after.get(&key), Some(&item));
    }

    #[tokio::test]
    async fn create_rejects_blank_titles() {
        let store = TodoStore::new();
        assert!(matches!(
            store.create("").await,
            Err(StoreError::EmptyTitle)
        ));
        assert!(matches!(
            store.create("   ").await,
            Err(StoreError::EmptyTitle)
        ));
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn keys_are_never_reused_after_delete() {
        let store = TodoStore::new();
        let (first, _) = store.create("one").await.unwrap();
        store.delete(&first).await;
        let (second, _) = store.create("two").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = TodoStore::new();
        let (key, _) = store.create("ephemeral").await.unwrap();
        let after_first = store.delete(&key).await;
        assert!(after_first.is_empty());
        let after_second = store.delete(&key).await;
        assert_eq!(after_first, after_second);
    }

    #[tokio::test]
    async fn delete_preserves_insertion_order() {
        let store = TodoStore::new();
        let (a, _) = store.create("a").await.unwrap();
        let (b, _) = store.create("b").await.unwrap();
        let (c, _) = store.create("c").await.unwrap();

        store.delete(&b).await;
        let list = store.snapshot().await;
        let keys: Vec<&String> = list.keys().collect();
        assert_eq!(keys, vec![&a, &c]);
    }

    #[tokio::test]
    async fn toggle_twice_restores_original_value() {
        let store = TodoStore::new();
        let (key, item) = store.create("flip me").await.unwrap();
        let original = item.complete;

        let once = store.toggle(&key).await.unwrap();
        assert_eq!(once[&key].complete, !original);

        let twice = store.toggle(&key).await.unwrap();
        assert_eq!(twice[&key].complete, original);
    }

    #[tokio::test]
    async fn toggle_unknown_key_reports_not_found() {
        let store = TodoStore::new();
        match store.toggle("42").await {
            Err(StoreError::NotFound(key)) => assert_eq!(key, "42"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn list_size_tracks_creates_and_deletes() {
        let store = TodoStore::new();
        let mut keys = Vec::new();
        for n in 0..8 {
            let (key, _) = store.create(&format!("item {n}")).await.unwrap();
            keys.push(key);
        }
        for key in keys.iter().take(3) {
            store.delete(key).await;
        }
        assert_eq!(store.len().await, 5);
    }
}
