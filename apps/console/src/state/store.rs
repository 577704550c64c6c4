//! # Resource Store
//!
//! Async wrapper that runs each catalog operation against the API and feeds
//! its lifecycle into a [`StoreState`].
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ResourceStore Concurrency                            │
//! │                                                                         │
//! │  ResourceStore<R> (Clone)                                              │
//! │  ┌──────────────────────────────────────────────┐                      │
//! │  │  state:  Arc<Mutex<StoreState<R>>>  (shared) │                      │
//! │  │  client: ResourceClient<R>                   │                      │
//! │  └──────────────────────────────────────────────┘                      │
//! │                                                                         │
//! │  op():  lock ─► Pending ─► unlock                                      │
//! │         .await client call          (lock NOT held)                    │
//! │         lock ─► Fulfilled | Rejected ─► unlock                         │
//! │                                                                         │
//! │  Overlapping operations are neither queued nor cancelled: whichever   │
//! │  response arrives last writes last.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use depot_client::{ClientResult, ResourceClient};
use depot_core::{Operation, PatchOutcome, Resource, ResourceId, StoreEvent, StoreState};
use tracing::{debug, info, warn};

use crate::error::ConsoleResult;

/// Client-side cache of one resource collection plus its API client.
pub struct ResourceStore<R: Resource> {
    state: Arc<Mutex<StoreState<R>>>,
    client: ResourceClient<R>,
}

impl<R: Resource> Clone for ResourceStore<R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            client: self.client.clone(),
        }
    }
}

impl<R: Resource> ResourceStore<R> {
    pub fn new(client: ResourceClient<R>) -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::new())),
            client,
        }
    }

    pub fn client(&self) -> &ResourceClient<R> {
        &self.client
    }

    /// Executes a function with read access to the store state.
    pub fn with_state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&StoreState<R>) -> T,
    {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Copy of the canonical collection.
    pub fn items(&self) -> Vec<R> {
        self.with_state(|state| state.items().to_vec())
    }

    pub fn is_loading(&self) -> bool {
        self.with_state(StoreState::is_loading)
    }

    pub fn error(&self) -> Option<String> {
        self.with_state(|state| state.error().map(str::to_string))
    }

    pub fn selected(&self) -> Option<R> {
        self.with_state(|state| state.selected().cloned())
    }

    fn dispatch(&self, event: StoreEvent<R>) -> PatchOutcome {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.apply(event)
    }

    /// Records the outcome of an API call: `on_success` builds the fulfilled
    /// event, a failure becomes `Rejected` and is returned to the caller.
    fn settle<T>(
        &self,
        op: Operation,
        result: ClientResult<T>,
        on_success: impl FnOnce(&T) -> StoreEvent<R>,
    ) -> ConsoleResult<(T, PatchOutcome)> {
        match result {
            Ok(value) => {
                let outcome = self.dispatch(on_success(&value));
                Ok((value, outcome))
            }
            Err(e) => {
                warn!(kind = %R::KIND, %op, error = %e, "Store operation rejected");
                self.dispatch(StoreEvent::Rejected {
                    op,
                    message: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Fetches the whole collection and replaces the cache with it.
    pub async fn list_all(&self) -> ConsoleResult<()> {
        let start = Instant::now();
        self.dispatch(StoreEvent::Pending(Operation::ListAll));

        let result = self.client.list().await;
        self.settle(Operation::ListAll, result, |items| StoreEvent::ListFulfilled(items.clone()))?;

        debug!(
            kind = %R::KIND,
            count = self.with_state(|s| s.items().len()),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "list_all fulfilled"
        );
        Ok(())
    }

    /// Fetches one record into `selected`; the list is untouched.
    pub async fn get_by_id(&self, id: &ResourceId) -> ConsoleResult<R> {
        self.dispatch(StoreEvent::Pending(Operation::GetById));
        let result = self.client.get(id).await;
        let (record, _) = self.settle(Operation::GetById, result, |r| StoreEvent::GetFulfilled(r.clone()))?;
        Ok(record)
    }

    /// Creates a record and appends the server's copy to the end of the list.
    pub async fn create(&self, draft: &R::Draft) -> ConsoleResult<R> {
        self.dispatch(StoreEvent::Pending(Operation::Create));
        let result = self.client.create(draft).await;
        let (record, _) = self.settle(Operation::Create, result, |r| StoreEvent::CreateFulfilled(r.clone()))?;
        Ok(record)
    }

    /// Updates a record and replaces it in place.
    ///
    /// When the response's id matches nothing in the cache, the whole list is
    /// refetched instead of leaving the cache stale.
    pub async fn update(&self, id: &ResourceId, draft: &R::Draft) -> ConsoleResult<R> {
        self.dispatch(StoreEvent::Pending(Operation::Update));
        let result = self.client.update(id, draft).await;
        let (record, outcome) =
            self.settle(Operation::Update, result, |r| StoreEvent::UpdateFulfilled(r.clone()))?;

        if outcome == PatchOutcome::Unmatched {
            info!(kind = %R::KIND, id = %record.id(), "Updated record not in cache, refetching list");
            self.list_all().await?;
        }
        Ok(record)
    }

    /// Deletes a record and drops exactly that id from the list.
    pub async fn delete_by_id(&self, id: &ResourceId) -> ConsoleResult<()> {
        self.dispatch(StoreEvent::Pending(Operation::Delete));
        let result = self.client.delete(id).await;
        let ((), outcome) =
            self.settle(Operation::Delete, result, |_| StoreEvent::DeleteFulfilled(id.clone()))?;
        if outcome == PatchOutcome::Unmatched {
            debug!(kind = %R::KIND, %id, "Deleted record was not cached");
        }
        Ok(())
    }

    /// Synchronously sets or clears the selected record.
    pub fn set_selected(&self, record: Option<R>) {
        self.dispatch(StoreEvent::SetSelected(record));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_client::{ApiClient, TokenAccessor};
    use depot_core::{State, StateDraft, Status};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(server: &MockServer) -> ResourceStore<State> {
        let api = ApiClient::new(&server.uri(), TokenAccessor::in_memory(Some("tok"))).unwrap();
        ResourceStore::new(ResourceClient::new(api))
    }

    fn state_json(id: &str, name: &str, code: &str) -> serde_json::Value {
        json!({ "_id": id, "name": name, "code": code, "status": "Active" })
    }

    async fn mount_list(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": body })))
            .mount(server)
            .await;
    }

    fn ids(store: &ResourceStore<State>) -> Vec<String> {
        store.items().into_iter().map(|s| s.id.to_string()).collect()
    }

    #[tokio::test]
    async fn test_list_all_replaces_items_in_order() {
        let server = MockServer::start().await;
        mount_list(&server, json!([state_json("2", "Utah", "UT"), state_json("1", "Texas", "TX")])).await;

        let store = store(&server);
        store.list_all().await.unwrap();
        assert_eq!(ids(&store), vec!["2", "1"]);
        assert!(!store.is_loading());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn test_create_on_empty_store_yields_server_record() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/state"))
            .respond_with(ResponseTemplate::new(201).set_body_json(state_json("42", "Ohio", "OH")))
            .mount(&server)
            .await;

        let store = store(&server);
        let draft = StateDraft {
            name: "Ohio".to_string(),
            code: "OH".to_string(),
            status: Status::Active,
        };
        store.create(&draft).await.unwrap();

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ResourceId::new("42"));
        assert_eq!(items[0].name, "Ohio");
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_that_id() {
        let server = MockServer::start().await;
        mount_list(&server, json!([state_json("1", "Texas", "TX"), state_json("2", "Utah", "UT")])).await;
        Mock::given(method("DELETE"))
            .and(path("/api/state/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let store = store(&server);
        store.list_all().await.unwrap();
        store.delete_by_id(&ResourceId::new("1")).await.unwrap();
        assert_eq!(ids(&store), vec!["2"]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_items_and_records_error() {
        let server = MockServer::start().await;
        mount_list(&server, json!([state_json("1", "Texas", "TX")])).await;
        Mock::given(method("DELETE"))
            .and(path("/api/state/1"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let store = store(&server);
        store.list_all().await.unwrap();
        assert!(store.delete_by_id(&ResourceId::new("1")).await.is_err());

        assert_eq!(ids(&store), vec!["1"]);
        assert!(store.error().is_some());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let server = MockServer::start().await;
        mount_list(&server, json!([state_json("1", "Texas", "TX"), state_json("2", "Utah", "UT")])).await;
        Mock::given(method("PUT"))
            .and(path("/api/state/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(state_json("1", "Texas", "TEX")))
            .mount(&server)
            .await;

        let store = store(&server);
        store.list_all().await.unwrap();
        let draft = StateDraft {
            name: "Texas".to_string(),
            code: "TEX".to_string(),
            status: Status::Active,
        };
        store.update(&ResourceId::new("1"), &draft).await.unwrap();

        let items = store.items();
        assert_eq!(items[0].code, "TEX");
        assert_eq!(ids(&store), vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_unmatched_update_refetches_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/state"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": [state_json("9", "Maine", "ME")] })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/state/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(state_json("9", "Maine", "ME")))
            .mount(&server)
            .await;

        let store = store(&server);
        let draft = StateDraft {
            name: "Maine".to_string(),
            code: "ME".to_string(),
            status: Status::Active,
        };
        store.update(&ResourceId::new("9"), &draft).await.unwrap();
        assert_eq!(ids(&store), vec!["9"]);
    }

    #[tokio::test]
    async fn test_stale_list_completing_after_delete_reintroduces_row() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/state"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": [state_json("1", "Texas", "TX"), state_json("2", "Utah", "UT")] }))
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/state/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let store = store(&server);
        let id = ResourceId::new("1");
        let (listed, deleted) = tokio::join!(store.list_all(), store.delete_by_id(&id));
        listed.unwrap();
        deleted.unwrap();

        assert_eq!(ids(&store), vec!["1", "2"]);
    }

    #[test]
    fn test_set_selected_is_synchronous() {
        let api = ApiClient::new("http://localhost:4000", TokenAccessor::in_memory(None)).unwrap();
        let store: ResourceStore<State> = ResourceStore::new(ResourceClient::new(api));
        let texas = State {
            id: ResourceId::new("1"),
            name: "Texas".to_string(),
            code: "TX".to_string(),
            status: Status::Active,
        };
        store.set_selected(Some(texas.clone()));
        assert_eq!(store.selected(), Some(texas));
        store.set_selected(None);
        assert!(store.selected().is_none());
    }
}
