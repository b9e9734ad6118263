use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;

use crate::error::ApiError;
use crate::model::Entity;
use crate::toast::{Toast, ToastQueue};

use super::{Endpoints, ResourceError, ResourceState};

/// Shared list state for one entity type.
///
/// `fetch` moves the state through `Loading` to `Ready` or `Error`. Every
/// successful create, update or delete pushes a success toast and re-fetches
/// the list; failures push an error toast and leave the list untouched.
/// Clones share the same state.
///
/// # Example
///
/// ```ignore
/// let orders = ResourceSlice::new(RestEndpoints::<Record>::new(client, "orders"), toasts);
/// orders.fetch().await?;
/// table.set_data(orders.items());
/// ```
pub struct ResourceSlice<T: Entity> {
    state: Arc<RwLock<ResourceState<Vec<T>>>>,
    endpoints: Arc<dyn Endpoints<T>>,
    toasts: ToastQueue,
    dirty: Arc<AtomicBool>,
    /// Serializes fetches so the last one started is the last one applied.
    fetching: Arc<Mutex<()>>,
}

impl<T: Entity> Clone for ResourceSlice<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            endpoints: Arc::clone(&self.endpoints),
            toasts: self.toasts.clone(),
            dirty: Arc::clone(&self.dirty),
            fetching: Arc::clone(&self.fetching),
        }
    }
}

impl<T: Entity> std::fmt::Debug for ResourceSlice<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceSlice")
            .field("entity", &T::LABEL)
            .field("state", &self.state_label())
            .finish()
    }
}

impl<T: Entity> ResourceSlice<T> {
    /// Create an idle slice.
    pub fn new(endpoints: impl Endpoints<T> + 'static, toasts: ToastQueue) -> Self {
        Self {
            state: Arc::new(RwLock::new(ResourceState::Idle)),
            endpoints: Arc::new(endpoints),
            toasts,
            dirty: Arc::new(AtomicBool::new(false)),
            fetching: Arc::new(Mutex::new(())),
        }
    }

    fn set(&self, state: ResourceState<Vec<T>>) {
        if let Ok(mut guard) = self.state.write() {
            *guard = state;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn state_label(&self) -> &'static str {
        match self.state.read().as_deref() {
            Ok(ResourceState::Idle) => "idle",
            Ok(ResourceState::Loading) => "loading",
            Ok(ResourceState::Ready(_)) => "ready",
            Ok(ResourceState::Error(_)) => "error",
            Err(_) => "poisoned",
        }
    }

    fn label() -> String {
        T::LABEL.to_lowercase()
    }

    // -------------------------------------------------------------------------
    // Requests
    // -------------------------------------------------------------------------

    /// Load the collection.
    pub async fn fetch(&self) -> Result<Vec<T>, ApiError> {
        let _guard = self.fetching.lock().await;
        self.set(ResourceState::Loading);
        log::debug!("Fetching {} list", Self::label());

        match self.endpoints.list().await {
            Ok(items) => {
                log::debug!("Fetched {} {} records", items.len(), Self::label());
                self.set(ResourceState::Ready(items.clone()));
                Ok(items)
            }
            Err(err) => {
                log::error!("Failed to fetch {} list: {}", Self::label(), err);
                self.set(ResourceState::Error(ResourceError::from(&err)));
                self.toasts.push(
                    Toast::error(format!("Failed to load {} list", Self::label()))
                        .with_body(err.to_string()),
                );
                Err(err)
            }
        }
    }

    /// Create a record, then re-fetch.
    pub async fn create(&self, item: &T) -> Result<T, ApiError> {
        let result = self.endpoints.create(item).await;
        self.settle("create", "created", result).await
    }

    /// Update a record, then re-fetch.
    pub async fn update(&self, item: &T) -> Result<T, ApiError> {
        let result = self.endpoints.update(item).await;
        self.settle("update", "updated", result).await
    }

    /// Delete a record by id, then re-fetch.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let result = self.endpoints.delete(id).await;
        self.settle("delete", "deleted", result).await
    }

    /// Report a finished mutation and refresh the list on success.
    async fn settle<R>(
        &self,
        verb: &str,
        past: &str,
        result: Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        match result {
            Ok(value) => {
                log::debug!("{} {}", T::LABEL, past);
                self.toasts.push(Toast::success(format!("{} {}", T::LABEL, past)));
                // A failed re-fetch is reported by fetch itself.
                let _ = self.fetch().await;
                Ok(value)
            }
            Err(err) => {
                log::error!("Failed to {} {}: {}", verb, Self::label(), err);
                self.toasts.push(
                    Toast::error(format!("Failed to {} {}", verb, Self::label()))
                        .with_body(err.to_string()),
                );
                Err(err)
            }
        }
    }

    // -------------------------------------------------------------------------
    // State
    // -------------------------------------------------------------------------

    /// Get a clone of the current state.
    pub fn get(&self) -> ResourceState<Vec<T>> {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(ResourceState::Idle)
    }

    /// Loaded records, empty unless the last fetch succeeded.
    pub fn items(&self) -> Vec<T> {
        self.state
            .read()
            .ok()
            .and_then(|guard| guard.as_ready().cloned())
            .unwrap_or_default()
    }

    /// Replace the records without a request, e.g. from a local file.
    pub fn set_ready(&self, items: Vec<T>) {
        self.set(ResourceState::Ready(items));
    }

    pub fn is_loading(&self) -> bool {
        self.state
            .read()
            .map(|guard| guard.is_loading())
            .unwrap_or(false)
    }

    pub fn is_ready(&self) -> bool {
        self.state
            .read()
            .map(|guard| guard.is_ready())
            .unwrap_or(false)
    }

    /// The error of the last fetch, if it failed.
    pub fn error(&self) -> Option<ResourceError> {
        self.state
            .read()
            .ok()
            .and_then(|guard| guard.as_error().cloned())
    }

    /// Toasts produced by this slice.
    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    /// Check if the state has changed since the last check.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag.
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}
