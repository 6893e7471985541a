//! Generic CRUD store over a REST collection.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{Action, Resource, Store};
use crate::auth::AuthSignal;
use crate::client::HttpClient;
use crate::errors::AppError;
use crate::validation::Validate;

/// Store plus the operations that keep it in sync with one API collection.
///
/// Each mutating operation issues exactly one request and, only when it
/// succeeds, dispatches one action built from the response.
pub struct CrudStore<R: Resource> {
    pub(crate) client: HttpClient,
    pub(crate) store: Store<R>,
}

impl<R: Resource> CrudStore<R> {
    pub fn new(client: HttpClient, name: &'static str) -> Self {
        Self {
            client,
            store: Store::new(name),
        }
    }

    /// Current collection snapshot.
    pub fn snapshot(&self) -> Arc<Vec<R>> {
        self.store.snapshot()
    }

    /// Receive every future snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<R>>> {
        self.store.subscribe()
    }

    /// Dispatch an action directly, bypassing the API.
    pub fn dispatch(&self, action: Action<R>) {
        self.store.dispatch(action);
    }

    /// Replace the collection with the API's full listing.
    pub async fn fetch_all(&self) -> Result<(), AppError> {
        let items: Vec<R> = self.client.get(&R::list_path()).await?;
        tracing::info!("Fetched {} {}", items.len(), self.store.name());
        self.store.dispatch(Action::FetchAll(items));
        Ok(())
    }

    /// Create an entity; the API's canonical copy is appended.
    pub async fn create(&self, input: &R::Input) -> Result<R, AppError> {
        input.validate()?;
        let created: R = self.client.post(&R::create_path(), input).await?;
        self.store.dispatch(Action::Create(created.clone()));
        Ok(created)
    }

    /// Replace an entity's fields; the API's copy replaces the local one.
    pub async fn update(&self, key: &R::Key, input: &R::Input) -> Result<R, AppError> {
        input.validate_update()?;
        let updated: R = self.client.put(&R::item_path(key)?, input).await?;
        self.store.dispatch(Action::Update(updated.clone()));
        Ok(updated)
    }

    /// Delete an entity. The request is sent even if the key is not held locally.
    pub async fn delete(&self, key: &R::Key) -> Result<(), AppError> {
        self.client.delete(&R::item_path(key)?).await?;
        self.store.dispatch(Action::Delete(key.clone()));
        Ok(())
    }

    /// Fetch one entity without touching the store (edit form hydration).
    pub async fn get_by_id(&self, key: &R::Key) -> Result<R, AppError> {
        self.client.get(&R::item_path(key)?).await
    }

    /// Spawn a task that reloads the collection each time the user signs in.
    ///
    /// Load failures are logged and leave the collection as it was; an empty
    /// collection is a valid state.
    pub fn load_on_sign_in(self: &Arc<Self>, auth: &AuthSignal) -> JoinHandle<()> {
        let store = Arc::clone(self);
        let mut rx = auth.subscribe();

        tokio::spawn(async move {
            let mut was_signed_in = false;
            loop {
                let signed_in = rx.borrow_and_update().is_signed_in();
                if signed_in && !was_signed_in {
                    if let Err(e) = store.fetch_all().await {
                        tracing::error!("Initial load of {} failed: {}", store.store.name(), e);
                    }
                }
                was_signed_in = signed_in;

                if rx.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}
