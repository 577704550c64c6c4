//! # Store State
//!
//! The client-side cache of one resource collection, plus its request
//! lifecycle flags. This module is the pure reducer; the async wrapper that
//! talks to the API lives in the console (`state::store`).
//!
//! ## Operation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Every Operation: pending → fulfilled | rejected         │
//! │                                                                         │
//! │  Event                         Effect on StoreState                     │
//! │  ─────                         ────────────────────                     │
//! │  Pending(op)              ───► loading = true, error = None             │
//! │  ListFulfilled(items)     ───► items = response (wholesale, in order)   │
//! │  GetFulfilled(item)       ───► selected = item (list untouched)         │
//! │  CreateFulfilled(item)    ───► items.push(item)                         │
//! │  UpdateFulfilled(item)    ───► items[pos of item.id] = item | no-op     │
//! │  DeleteFulfilled(id)      ───► items.retain(id != ..)                   │
//! │  Rejected { op, message } ───► error = message (items untouched)        │
//! │  SetSelected(item)        ───► selected = item (synchronous)            │
//! │                                                                         │
//! │  Every fulfilled/rejected event also sets loading = false.             │
//! │  ONE loading flag per resource type: overlapping operations simply     │
//! │  set it again; completions apply in the order they arrive.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use crate::resource::Resource;
use crate::types::ResourceId;

/// The store operations, used to tag pending/rejected events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListAll,
    GetById,
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::ListAll => "list",
            Operation::GetById => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// A state transition of the store.
#[derive(Debug, Clone)]
pub enum StoreEvent<R: Resource> {
    Pending(Operation),
    ListFulfilled(Vec<R>),
    GetFulfilled(R),
    CreateFulfilled(R),
    UpdateFulfilled(R),
    DeleteFulfilled(ResourceId),
    Rejected { op: Operation, message: String },
    SetSelected(Option<R>),
}

/// What applying an event did to the item collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The event changed (or was allowed to leave) the list as specified.
    Applied,
    /// An update/delete found no item with the identifier; list unchanged.
    Unmatched,
    /// The event does not touch the list.
    Untouched,
}

/// Cached collection plus lifecycle flags for one resource type.
#[derive(Debug, Clone)]
pub struct StoreState<R: Resource> {
    items: Vec<R>,
    loading: bool,
    error: Option<String>,
    selected: Option<R>,
}

impl<R: Resource> Default for StoreState<R> {
    fn default() -> Self {
        StoreState {
            items: Vec::new(),
            loading: false,
            error: None,
            selected: None,
        }
    }
}

impl<R: Resource> StoreState<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The canonical collection, in server/insertion order.
    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&R> {
        self.selected.as_ref()
    }

    /// Applies one event and reports its effect on the list.
    pub fn apply(&mut self, event: StoreEvent<R>) -> PatchOutcome {
        match event {
            StoreEvent::Pending(_) => {
                self.loading = true;
                self.error = None;
                PatchOutcome::Untouched
            }
            StoreEvent::ListFulfilled(items) => {
                self.loading = false;
                self.items = items;
                PatchOutcome::Applied
            }
            StoreEvent::GetFulfilled(item) => {
                self.loading = false;
                self.selected = Some(item);
                PatchOutcome::Untouched
            }
            StoreEvent::CreateFulfilled(item) => {
                self.loading = false;
                self.items.push(item);
                PatchOutcome::Applied
            }
            StoreEvent::UpdateFulfilled(item) => {
                self.loading = false;
                match self.items.iter().position(|existing| existing.id() == item.id()) {
                    Some(index) => {
                        self.items[index] = item;
                        PatchOutcome::Applied
                    }
                    None => PatchOutcome::Unmatched,
                }
            }
            StoreEvent::DeleteFulfilled(id) => {
                self.loading = false;
                let before = self.items.len();
                self.items.retain(|item| item.id() != &id);
                if self.items.len() == before {
                    PatchOutcome::Unmatched
                } else {
                    PatchOutcome::Applied
                }
            }
            StoreEvent::Rejected { message, .. } => {
                self.loading = false;
                self.error = Some(message);
                PatchOutcome::Untouched
            }
            StoreEvent::SetSelected(item) => {
                self.selected = item;
                PatchOutcome::Untouched
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{State, Status};

    fn state(id: &str, name: &str, code: &str) -> State {
        State {
            id: ResourceId::new(id),
            name: name.to_string(),
            code: code.to_string(),
            status: Status::Active,
        }
    }

    fn ids(store: &StoreState<State>) -> Vec<&str> {
        store.items().iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_list_replaces_wholesale_in_response_order() {
        let mut store = StoreState::new();
        store.apply(StoreEvent::ListFulfilled(vec![state("9", "Old", "OL")]));

        store.apply(StoreEvent::Pending(Operation::ListAll));
        assert!(store.is_loading());

        store.apply(StoreEvent::ListFulfilled(vec![
            state("3", "Utah", "UT"),
            state("1", "Texas", "TX"),
        ]));
        assert!(!store.is_loading());
        assert_eq!(ids(&store), vec!["3", "1"]);
    }

    #[test]
    fn test_create_appends_server_record() {
        let mut store = StoreState::new();
        store.apply(StoreEvent::Pending(Operation::Create));
        store.apply(StoreEvent::CreateFulfilled(state("42", "Ohio", "OH")));

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0], state("42", "Ohio", "OH"));
    }

    #[test]
    fn test_create_appends_at_end_not_sorted() {
        let mut store = StoreState::new();
        store.apply(StoreEvent::ListFulfilled(vec![state("2", "Utah", "UT")]));
        store.apply(StoreEvent::CreateFulfilled(state("1", "Alabama", "AL")));
        assert_eq!(ids(&store), vec!["2", "1"]);
    }

    #[test]
    fn test_delete_removes_only_matching_id() {
        let mut store = StoreState::new();
        store.apply(StoreEvent::ListFulfilled(vec![
            state("1", "Texas", "TX"),
            state("2", "Utah", "UT"),
            state("3", "Ohio", "OH"),
        ]));

        let outcome = store.apply(StoreEvent::DeleteFulfilled(ResourceId::new("1")));
        assert_eq!(outcome, PatchOutcome::Applied);
        assert_eq!(ids(&store), vec!["2", "3"]);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = StoreState::new();
        store.apply(StoreEvent::ListFulfilled(vec![
            state("1", "Texas", "TX"),
            state("2", "Utah", "UT"),
        ]));

        let outcome = store.apply(StoreEvent::UpdateFulfilled(state("1", "Texas", "TEX")));
        assert_eq!(outcome, PatchOutcome::Applied);
        assert_eq!(store.items()[0].code, "TEX");
        assert_eq!(ids(&store), vec!["1", "2"]);
    }

    #[test]
    fn test_update_without_match_is_noop() {
        let mut store = StoreState::new();
        store.apply(StoreEvent::ListFulfilled(vec![state("1", "Texas", "TX")]));

        let outcome = store.apply(StoreEvent::UpdateFulfilled(state("7", "Maine", "ME")));
        assert_eq!(outcome, PatchOutcome::Unmatched);
        assert_eq!(store.items(), &[state("1", "Texas", "TX")]);
    }

    #[test]
    fn test_rejection_keeps_items_and_records_error() {
        let mut store = StoreState::new();
        store.apply(StoreEvent::ListFulfilled(vec![state("1", "Texas", "TX")]));
        store.apply(StoreEvent::Pending(Operation::Delete));
        store.apply(StoreEvent::Rejected {
            op: Operation::Delete,
            message: "HTTP 500".to_string(),
        });

        assert!(!store.is_loading());
        assert_eq!(store.error(), Some("HTTP 500"));
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_get_sets_selected_without_touching_list() {
        let mut store = StoreState::new();
        store.apply(StoreEvent::GetFulfilled(state("5", "Iowa", "IA")));
        assert!(store.items().is_empty());
        assert_eq!(store.selected().map(|s| s.name.as_str()), Some("Iowa"));

        store.apply(StoreEvent::SetSelected(None));
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_completion_order_can_reintroduce_deleted_row() {
        let mut store = StoreState::new();
        store.apply(StoreEvent::ListFulfilled(vec![state("1", "Texas", "TX"), state("2", "Utah", "UT")]));

        // list requested before the delete, but resolving after it
        store.apply(StoreEvent::Pending(Operation::ListAll));
        store.apply(StoreEvent::Pending(Operation::Delete));
        store.apply(StoreEvent::DeleteFulfilled(ResourceId::new("1")));
        store.apply(StoreEvent::ListFulfilled(vec![state("1", "Texas", "TX"), state("2", "Utah", "UT")]));

        assert_eq!(ids(&store), vec!["1", "2"]);
    }
}
