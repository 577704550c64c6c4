//! # depot-core: Pure Catalog Logic for the Depot Console
//!
//! This crate holds everything the console knows about States, Cities and
//! Warehouses that does not need a network or a terminal.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Depot Console Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Console (apps/console)                       │   │
//! │  │   CLI ──► command flows ──► ResourceStore ──► render           │   │
//! │  └──────────────┬──────────────────────────────┬───────────────────┘   │
//! │                 │                              │                        │
//! │  ┌──────────────▼──────────────────┐  ┌────────▼────────────────────┐  │
//! │  │  ★ depot-core (THIS CRATE) ★    │  │  depot-client               │  │
//! │  │                                 │  │  config, token storage,     │  │
//! │  │  types  store  list_view        │  │  ResourceClient<R>,         │  │
//! │  │  form   navigation  validation  │  │  AuthClient                 │  │
//! │  │                                 │  └────────┬────────────────────┘  │
//! │  │  NO I/O • NO NETWORK            │           │ HTTPS + Bearer        │
//! │  └─────────────────────────────────┘  ┌────────▼────────────────────┐  │
//! │                                       │  Catalog API (/api/...)     │  │
//! │                                       └─────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - State, City, Warehouse and their drafts
//! - [`resource`] - The `Resource` trait shared by the three entity types
//! - [`store`] - Pending/fulfilled/rejected reducer for one collection
//! - [`list_view`] - Sort and filter derivation for tables
//! - [`form`] - Create/edit form state, including the warehouse dependent select
//! - [`navigation`] - Routes, side menu, auth gate, notifications
//! - [`validation`] - Required-field checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use depot_core::list_view::ListView;
//! use depot_core::resource::{SortDirection, SortKey};
//! use depot_core::types::{ResourceId, State, Status};
//!
//! let states = vec![
//!     State { id: ResourceId::new("1"), name: "Texas".into(), code: "TX".into(), status: Status::Active },
//!     State { id: ResourceId::new("2"), name: "Utah".into(), code: "UT".into(), status: Status::Active },
//! ];
//!
//! let view = ListView::new()
//!     .sorted_by(SortKey::Name, SortDirection::Descending)
//!     .searching("t");
//! let rows = view.derive(&states).unwrap();
//! assert_eq!(rows[0].name, "Utah");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod form;
pub mod list_view;
pub mod navigation;
pub mod resource;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use list_view::ListView;
pub use navigation::{Notification, NotificationKind, Route};
pub use resource::{Resource, ResourceKind, SortDirection, SortKey};
pub use store::{Operation, PatchOutcome, StoreEvent, StoreState};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Text shown in place of a related record's name when the server did not
/// embed one.
pub const NOT_AVAILABLE: &str = "Not Available";

/// Pause between a successful form submit and the return to the list.
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1000;
