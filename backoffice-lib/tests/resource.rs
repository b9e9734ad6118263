//! Resource slice behaviour against an in-process collection.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use backoffice_lib::model::{Entity, Record};
use backoffice_lib::resource::{Endpoints, ResourceSlice, ResourceState};
use backoffice_lib::toast::{ToastLevel, ToastQueue};
use backoffice_lib::ApiError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Discount {
    id: Option<u32>,
    code: String,
    percent: u8,
}

impl Entity for Discount {
    const LABEL: &'static str = "Discount";

    fn id(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

fn discount(id: u32, code: &str) -> Discount {
    Discount {
        id: Some(id),
        code: code.to_string(),
        percent: 10,
    }
}

/// A collection held in memory. `failing` makes every call return a 503.
#[derive(Clone, Default)]
struct FakeCollection {
    items: Arc<Mutex<Vec<Discount>>>,
    failing: Arc<AtomicBool>,
    list_calls: Arc<AtomicUsize>,
}

impl FakeCollection {
    fn with(items: Vec<Discount>) -> Self {
        let collection = Self::default();
        *collection.items.lock().unwrap() = items;
        collection
    }

    fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ApiError::http(503, "service unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Endpoints<Discount> for FakeCollection {
    async fn list(&self) -> Result<Vec<Discount>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create(&self, item: &Discount) -> Result<Discount, ApiError> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let next = items.iter().filter_map(|d| d.id).max().unwrap_or(0) + 1;
        let created = Discount {
            id: Some(next),
            ..item.clone()
        };
        items.push(created.clone());
        Ok(created)
    }

    async fn update(&self, item: &Discount) -> Result<Discount, ApiError> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let slot = items
            .iter_mut()
            .find(|d| d.id == item.id)
            .ok_or_else(|| ApiError::http(404, "not found"))?;
        *slot = item.clone();
        Ok(item.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|d| d.id().as_deref() != Some(id));
        if items.len() == before {
            return Err(ApiError::http(404, "not found"));
        }
        Ok(())
    }
}

// =============================================================================
// Fetch
// =============================================================================

mod fetch {
    use super::*;

    #[tokio::test]
    async fn test_fetch_moves_to_ready() {
        let collection = FakeCollection::with(vec![discount(1, "SPRING"), discount(2, "VIP")]);
        let slice = ResourceSlice::new(collection, ToastQueue::new());
        assert_eq!(slice.get(), ResourceState::Idle);

        let items = slice.fetch().await.unwrap();
        assert_eq!(items.len(), 2);
        assert!(slice.is_ready());
        assert!(!slice.is_loading());
        assert_eq!(slice.items()[1].code, "VIP");
        assert!(slice.is_dirty());
        assert!(slice.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_sets_error_and_toasts() {
        let collection = FakeCollection::with(vec![discount(1, "SPRING")]);
        collection.fail(true);
        let toasts = ToastQueue::new();
        let slice = ResourceSlice::new(collection, toasts.clone());

        let err = slice.fetch().await.unwrap_err();
        assert_eq!(err.status_code(), Some(503));

        let error = slice.error().unwrap();
        assert!(error.retryable);
        assert!(slice.items().is_empty());

        let drained = toasts.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].level, ToastLevel::Error);
        assert_eq!(drained[0].title, "Failed to load discount list");
        assert!(drained[0].body.is_some());
    }

    #[tokio::test]
    async fn test_refetch_recovers_from_error() {
        let collection = FakeCollection::with(vec![discount(1, "SPRING")]);
        collection.fail(true);
        let slice = ResourceSlice::new(collection.clone(), ToastQueue::new());
        assert!(slice.fetch().await.is_err());

        collection.fail(false);
        slice.fetch().await.unwrap();
        assert!(slice.error().is_none());
        assert_eq!(slice.items().len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let slice = ResourceSlice::new(
            FakeCollection::with(vec![discount(1, "SPRING")]),
            ToastQueue::new(),
        );
        let other = slice.clone();
        slice.fetch().await.unwrap();
        assert_eq!(other.items().len(), 1);

        other.clear_dirty();
        assert!(!slice.is_dirty());
    }
}

// =============================================================================
// Mutations
// =============================================================================

mod mutations {
    use super::*;

    #[tokio::test]
    async fn test_create_toasts_and_refetches() {
        let collection = FakeCollection::with(vec![discount(1, "SPRING")]);
        let toasts = ToastQueue::new();
        let slice = ResourceSlice::new(collection.clone(), toasts.clone());
        slice.fetch().await.unwrap();

        let created = slice
            .create(&Discount {
                id: None,
                code: "WINTER".to_string(),
                percent: 15,
            })
            .await
            .unwrap();
        assert_eq!(created.id, Some(2));
        assert_eq!(slice.items().len(), 2);
        assert_eq!(collection.list_calls.load(Ordering::SeqCst), 2);

        let drained = toasts.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].level, ToastLevel::Success);
        assert_eq!(drained[0].title, "Discount created");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let collection = FakeCollection::with(vec![discount(1, "SPRING"), discount(2, "VIP")]);
        let toasts = ToastQueue::new();
        let slice = ResourceSlice::new(collection, toasts.clone());
        slice.fetch().await.unwrap();

        let mut changed = discount(2, "VIP");
        changed.percent = 25;
        slice.update(&changed).await.unwrap();
        assert_eq!(slice.items()[1].percent, 25);

        slice.delete("1").await.unwrap();
        assert_eq!(slice.items(), vec![changed]);

        let titles: Vec<_> = toasts.drain().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Discount updated", "Discount deleted"]);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_list() {
        let collection = FakeCollection::with(vec![discount(1, "SPRING")]);
        let toasts = ToastQueue::new();
        let slice = ResourceSlice::new(collection.clone(), toasts.clone());
        slice.fetch().await.unwrap();

        let err = slice.delete("42").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(slice.is_ready());
        assert_eq!(slice.items().len(), 1);
        assert_eq!(collection.list_calls.load(Ordering::SeqCst), 1);

        let drained = toasts.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].level, ToastLevel::Error);
        assert_eq!(drained[0].title, "Failed to delete discount");
    }

    #[tokio::test]
    async fn test_failed_refetch_after_mutation() {
        let collection = FakeCollection::with(vec![discount(1, "SPRING")]);
        let toasts = ToastQueue::new();
        let slice = ResourceSlice::new(collection.clone(), toasts.clone());
        slice.fetch().await.unwrap();

        // The create lands, then the list endpoint starts failing.
        let created = slice.create(&discount(0, "FLASH")).await;
        assert!(created.is_ok());
        collection.fail(true);
        assert!(slice.fetch().await.is_err());
        assert!(slice.error().is_some());

        let levels: Vec<_> = toasts.drain().into_iter().map(|t| t.level).collect();
        assert_eq!(levels, vec![ToastLevel::Success, ToastLevel::Error]);
    }
}

// =============================================================================
// Records
// =============================================================================

#[tokio::test]
async fn test_record_slice() {
    #[derive(Clone)]
    struct Orders;

    #[async_trait]
    impl Endpoints<Record> for Orders {
        async fn list(&self) -> Result<Vec<Record>, ApiError> {
            Ok(vec![
                Record::new().set("id", 1).set("status", "active"),
                Record::new().set("id", 2).set("status", "pending"),
            ])
        }

        async fn create(&self, item: &Record) -> Result<Record, ApiError> {
            Ok(item.clone())
        }

        async fn update(&self, item: &Record) -> Result<Record, ApiError> {
            item.id().ok_or(ApiError::MissingId)?;
            Ok(item.clone())
        }

        async fn delete(&self, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }
    }

    let toasts = ToastQueue::new();
    let slice = ResourceSlice::new(Orders, toasts.clone());
    slice.fetch().await.unwrap();
    assert_eq!(slice.items()[1].get_str("status"), Some("pending"));

    let err = slice.update(&Record::new().set("status", "x")).await.unwrap_err();
    assert!(matches!(err, ApiError::MissingId));
    assert_eq!(toasts.drain()[0].title, "Failed to update record");
}
