//! # Resource Abstraction
//!
//! The console manages three resource types that share one shape: a
//! server-managed collection with list/get/create/update/delete.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Pattern, Three Instances                         │
//! │                                                                         │
//! │               ┌──────────────────────────────┐                          │
//! │               │      trait Resource          │                          │
//! │               │  KIND, SORT_KEYS, Draft      │                          │
//! │               │  id(), sort_text(), search   │                          │
//! │               └──────────────┬───────────────┘                          │
//! │          ┌───────────────────┼───────────────────┐                      │
//! │          ▼                   ▼                   ▼                      │
//! │   ┌─────────────┐     ┌─────────────┐     ┌─────────────┐               │
//! │   │    State    │     │    City     │     │  Warehouse  │               │
//! │   │ /api/state  │     │  /api/city  │     │/api/warehouse│              │
//! │   └─────────────┘     └─────────────┘     └─────────────┘               │
//! │                                                                         │
//! │  StoreState<R>, ListView, ResourceClient<R>, ResourceStore<R> are all   │
//! │  written once against this trait.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ValidationError;
use crate::types::ResourceId;

// =============================================================================
// Resource Kind
// =============================================================================

/// The three catalog resource types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    State,
    City,
    Warehouse,
}

impl ResourceKind {
    /// All kinds in side-menu order.
    pub const ALL: [ResourceKind; 3] = [ResourceKind::State, ResourceKind::City, ResourceKind::Warehouse];

    /// Path segment under `/api/`.
    pub const fn path(&self) -> &'static str {
        match self {
            ResourceKind::State => "state",
            ResourceKind::City => "city",
            ResourceKind::Warehouse => "warehouse",
        }
    }

    /// Human-readable label used in headings and notifications.
    pub const fn label(&self) -> &'static str {
        match self {
            ResourceKind::State => "State",
            ResourceKind::City => "City",
            ResourceKind::Warehouse => "Warehouse",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Sort Key & Direction
// =============================================================================

/// A sortable table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    Name,
    Code,
    State,
    City,
    Status,
}

impl SortKey {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Code => "code",
            SortKey::State => "state",
            SortKey::City => "city",
            SortKey::Status => "status",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" | "_id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "code" => Ok(SortKey::Code),
            "state" => Ok(SortKey::State),
            "city" => Ok(SortKey::City),
            "status" => Ok(SortKey::Status),
            _ => Err(ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: ["id", "name", "code", "state", "city", "status"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

/// Sort direction for the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(ValidationError::NotAllowed {
                field: "direction".to_string(),
                allowed: vec!["asc".to_string(), "desc".to_string()],
            }),
        }
    }
}

// =============================================================================
// Resource Trait
// =============================================================================

/// A server-managed catalog entity.
///
/// ## Contract
/// - `id()` is the server-assigned identifier; it is never generated here.
/// - `sort_text()` returns the text the table compares for a column, or
///   `None` when the value is absent (e.g. no embedded State snapshot).
/// - `search_fields()` lists the texts the search box matches against.
pub trait Resource: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Request body for create and update.
    type Draft: Clone + fmt::Debug + Serialize + Send + Sync + 'static;

    const KIND: ResourceKind;

    /// Columns the list view may sort on.
    const SORT_KEYS: &'static [SortKey];

    fn id(&self) -> &ResourceId;

    fn name(&self) -> &str;

    fn sort_text(&self, key: SortKey) -> Option<&str>;

    fn search_fields(&self) -> Vec<&str>;

    /// Builds an edit form body pre-filled from this record.
    fn to_draft(&self) -> Self::Draft;
}
