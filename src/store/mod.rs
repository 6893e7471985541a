//! Reducer-backed domain stores.
//!
//! Every store holds an ordered collection that mirrors the most recent
//! successful API response. State only moves through [`reduce`]: operations
//! make one request, then dispatch one [`Action`] built from the response.

mod crud;
mod feedback;
mod patient_logs;
mod schedules;

pub use crud::*;
pub use patient_logs::*;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;

use crate::client;
use crate::errors::AppError;
use crate::validation::Validate;

/// A record held by a store, identified by a stable key.
pub trait Entity: Clone + Send + Sync + 'static {
    type Key: Clone + PartialEq + fmt::Display + fmt::Debug + Send + Sync + 'static;

    /// Domain-specific in-place transform (photo append, status refresh...).
    type Change: Clone + fmt::Debug + Send + Sync + 'static;

    fn key(&self) -> &Self::Key;

    fn apply(&mut self, change: Self::Change);
}

/// An entity served by a top-level REST collection
/// (`{COLLECTION}/all`, `{COLLECTION}/create`, `{COLLECTION}/{key}`).
pub trait Resource: Entity + DeserializeOwned {
    /// Body accepted by create and update.
    type Input: Serialize + Validate + Send + Sync;

    const COLLECTION: &'static str;
    const LIST_PATH: &'static str = "all";
    const CREATE_PATH: &'static str = "create";

    fn list_path() -> String {
        format!("{}/{}", Self::COLLECTION, Self::LIST_PATH)
    }

    fn create_path() -> String {
        format!("{}/{}", Self::COLLECTION, Self::CREATE_PATH)
    }

    fn item_path(key: &Self::Key) -> Result<String, AppError> {
        Ok(format!("{}/{}", Self::COLLECTION, client::segment(&key.to_string())?))
    }
}

/// State transitions a store understands.
#[derive(Debug, Clone)]
pub enum Action<E: Entity> {
    /// Replace the collection verbatim.
    FetchAll(Vec<E>),
    /// Append to the end. Keys are not deduplicated.
    Create(E),
    /// Replace matching items in place.
    Update(E),
    /// Remove matching items.
    Delete(E::Key),
    /// Apply a domain-specific change to matching items.
    Change { key: E::Key, change: E::Change },
}

impl<E: Entity> Action<E> {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::FetchAll(_) => "FETCH_ALL",
            Action::Create(_) => "CREATE",
            Action::Update(_) => "UPDATE",
            Action::Delete(_) => "DELETE",
            Action::Change { .. } => "CHANGE",
        }
    }
}

/// Derive the next collection from the current one.
///
/// Order is preserved: updates and changes stay in place, deletes leave no
/// gap, creates go last. A key that matches nothing is a no-op.
pub fn reduce<E: Entity>(items: &[E], action: Action<E>) -> Vec<E> {
    match action {
        Action::FetchAll(list) => list,
        Action::Create(item) => {
            let mut next = Vec::with_capacity(items.len() + 1);
            next.extend_from_slice(items);
            next.push(item);
            next
        }
        Action::Update(item) => items
            .iter()
            .map(|existing| {
                if existing.key() == item.key() {
                    item.clone()
                } else {
                    existing.clone()
                }
            })
            .collect(),
        Action::Delete(key) => items
            .iter()
            .filter(|existing| *existing.key() != key)
            .cloned()
            .collect(),
        Action::Change { key, change } => items
            .iter()
            .map(|existing| {
                let mut next = existing.clone();
                if *next.key() == key {
                    next.apply(change.clone());
                }
                next
            })
            .collect(),
    }
}

/// Snapshot holder for one entity type.
///
/// Snapshots are immutable `Arc<Vec<E>>`s; every dispatch publishes a new one
/// to subscribers. Dispatches are serialized, so two in-flight operations
/// never interleave their state updates.
pub struct Store<E: Entity> {
    tx: watch::Sender<Arc<Vec<E>>>,
    name: &'static str,
}

impl<E: Entity> Store<E> {
    pub fn new(name: &'static str) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(Vec::new()));
        Self { tx, name }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current collection snapshot.
    pub fn snapshot(&self) -> Arc<Vec<E>> {
        self.tx.borrow().clone()
    }

    /// Receive every future snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<E>>> {
        self.tx.subscribe()
    }

    /// Run the reducer and publish the result.
    pub fn dispatch(&self, action: Action<E>) {
        let kind = action.kind();
        self.tx.send_modify(|items| {
            let next = reduce(items, action);
            *items = Arc::new(next);
        });
        tracing::debug!(
            store = self.name,
            action = kind,
            len = self.tx.borrow().len(),
            "dispatched"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
        label: String,
        tags: Vec<String>,
    }

    #[derive(Debug, Clone)]
    enum ItemChange {
        Tag(String),
    }

    impl Entity for Item {
        type Key = String;
        type Change = ItemChange;

        fn key(&self) -> &String {
            &self.id
        }

        fn apply(&mut self, change: ItemChange) {
            match change {
                ItemChange::Tag(tag) => self.tags.push(tag),
            }
        }
    }

    fn item(id: &str, label: &str) -> Item {
        Item {
            id: id.to_string(),
            label: label.to_string(),
            tags: Vec::new(),
        }
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_fetch_all_replaces_verbatim() {
        let current = vec![item("1", "a")];
        let next = reduce(&current, Action::FetchAll(vec![item("3", "c"), item("2", "b")]));
        assert_eq!(ids(&next), vec!["3", "2"]);
    }

    #[test]
    fn test_create_appends_without_dedup() {
        let current = vec![item("1", "a"), item("2", "b")];
        let next = reduce(&current, Action::Create(item("1", "again")));
        assert_eq!(ids(&next), vec!["1", "2", "1"]);
        assert_eq!(next[2].label, "again");
    }

    #[test]
    fn test_update_replaces_in_place() {
        let current = vec![item("1", "a"), item("2", "b"), item("3", "c")];
        let next = reduce(&current, Action::Update(item("2", "B")));
        assert_eq!(ids(&next), vec!["1", "2", "3"]);
        assert_eq!(next[1].label, "B");
    }

    #[test]
    fn test_update_is_idempotent() {
        let current = vec![item("1", "a"), item("2", "b")];
        let once = reduce(&current, Action::Update(item("1", "z")));
        let twice = reduce(&once, Action::Update(item("1", "z")));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_update_absent_key_is_noop() {
        let current = vec![item("1", "a")];
        let next = reduce(&current, Action::Update(item("9", "ghost")));
        assert_eq!(next, current);
    }

    #[test]
    fn test_delete_removes_without_reordering() {
        let current = vec![item("1", "a"), item("2", "b"), item("3", "c")];
        let next = reduce(&current, Action::Delete("2".to_string()));
        assert_eq!(ids(&next), vec!["1", "3"]);

        let unchanged = reduce(&next, Action::Delete("42".to_string()));
        assert_eq!(unchanged, next);
    }

    #[test]
    fn test_change_targets_only_matching_key() {
        let current = vec![item("1", "a"), item("2", "b")];
        let next = reduce(
            &current,
            Action::Change {
                key: "2".to_string(),
                change: ItemChange::Tag("x".to_string()),
            },
        );
        assert!(next[0].tags.is_empty());
        assert_eq!(next[1].tags, vec!["x".to_string()]);

        let missing = reduce(
            &next,
            Action::Change {
                key: "7".to_string(),
                change: ItemChange::Tag("y".to_string()),
            },
        );
        assert_eq!(missing, next);
    }

    #[test]
    fn test_dispatch_publishes_new_snapshot() {
        let store: Store<Item> = Store::new("items");
        let before = store.snapshot();
        let mut rx = store.subscribe();

        store.dispatch(Action::Create(item("1", "a")));

        assert!(before.is_empty());
        assert_eq!(store.snapshot().len(), 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
