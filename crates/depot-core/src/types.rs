//! # Domain Types
//!
//! The catalog entities exchanged with the REST API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Entities                                │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │     State       │   │      City       │   │     Warehouse       │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  _id            │◄──│  state (rel)    │   │  _id                │   │
//! │  │  name           │   │  _id            │◄──│  city  (rel)        │   │
//! │  │  code           │   │  name           │   │  state (rel) ───────┼──►│
//! │  │  status         │   │  code, status   │   │  name, status       │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! │                                                                         │
//! │  (rel) = Relation: a bare id, or an embedded { _id, name } snapshot    │
//! │          the server includes in list responses.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity is keyed by an opaque server-assigned `_id`. The console
//! never generates identifiers and never changes them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::resource::{Resource, ResourceKind, SortKey};
use crate::NOT_AVAILABLE;

// =============================================================================
// Resource Id
// =============================================================================

/// Opaque server-assigned identifier (serialized as a plain string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        ResourceId(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId(id)
    }
}

// =============================================================================
// Status
// =============================================================================

/// Closed two-value status shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    /// Default for newly created records.
    #[default]
    Active,
    Inactive,
}

impl Status {
    /// The two options offered by edit forms.
    pub const ALL: [Status; 2] = [Status::Active, Status::Inactive];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: Status::ALL.iter().map(|s| s.to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Relation
// =============================================================================

/// Denormalized copy of a related record, present only when the server
/// embedded it in the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationSnapshot {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Reference from a City or Warehouse to its owning record.
///
/// List responses embed `{ "_id": .., "name": .. }`; create/update
/// responses usually carry only the id string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Relation {
    Snapshot(RelationSnapshot),
    Id(ResourceId),
}

impl Relation {
    /// The referenced id, if known.
    pub fn id(&self) -> Option<&ResourceId> {
        match self {
            Relation::Snapshot(snapshot) => snapshot.id.as_ref(),
            Relation::Id(id) => Some(id),
        }
    }

    /// The embedded display name, if the server included one.
    pub fn name(&self) -> Option<&str> {
        match self {
            Relation::Snapshot(snapshot) => snapshot.name.as_deref().filter(|n| !n.is_empty()),
            Relation::Id(_) => None,
        }
    }
}

/// Display text for an optional relation: the embedded name or "Not Available".
pub fn relation_display(relation: Option<&Relation>) -> &str {
    relation.and_then(Relation::name).unwrap_or(NOT_AVAILABLE)
}

fn relation_id(relation: Option<&Relation>) -> ResourceId {
    relation
        .and_then(Relation::id)
        .cloned()
        .unwrap_or_else(|| ResourceId::new(""))
}

// =============================================================================
// State
// =============================================================================

/// A State (top of the hierarchy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    #[serde(rename = "_id")]
    pub id: ResourceId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub status: Status,
}

/// Create/update body for a State.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDraft {
    pub name: String,
    pub code: String,
    pub status: Status,
}

impl Resource for State {
    type Draft = StateDraft;

    const KIND: ResourceKind = ResourceKind::State;
    const SORT_KEYS: &'static [SortKey] = &[SortKey::Id, SortKey::Name, SortKey::Code, SortKey::Status];

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn sort_text(&self, key: SortKey) -> Option<&str> {
        match key {
            SortKey::Id => Some(self.id.as_str()),
            SortKey::Name => Some(self.name.as_str()),
            SortKey::Code => Some(self.code.as_str()),
            SortKey::Status => Some(self.status.as_str()),
            SortKey::State | SortKey::City => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.code.as_str()]
    }

    fn to_draft(&self) -> StateDraft {
        StateDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            status: self.status,
        }
    }
}

// =============================================================================
// City
// =============================================================================

/// A City, owned by exactly one State.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(rename = "_id")]
    pub id: ResourceId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub status: Status,

    /// Owning State; the server resolves its name, the console never does.
    #[serde(default)]
    pub state: Option<Relation>,
}

impl City {
    /// The owning State's name, or "Not Available".
    pub fn state_name(&self) -> &str {
        relation_display(self.state.as_ref())
    }
}

/// Create/update body for a City.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDraft {
    pub name: String,
    pub code: String,
    pub state: ResourceId,
    pub status: Status,
}

impl Resource for City {
    type Draft = CityDraft;

    const KIND: ResourceKind = ResourceKind::City;
    const SORT_KEYS: &'static [SortKey] = &[
        SortKey::Id,
        SortKey::Name,
        SortKey::Code,
        SortKey::State,
        SortKey::Status,
    ];

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn sort_text(&self, key: SortKey) -> Option<&str> {
        match key {
            SortKey::Id => Some(self.id.as_str()),
            SortKey::Name => Some(self.name.as_str()),
            SortKey::Code => Some(self.code.as_str()),
            SortKey::State => self.state.as_ref().and_then(Relation::name),
            SortKey::Status => Some(self.status.as_str()),
            SortKey::City => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.code.as_str()]
    }

    fn to_draft(&self) -> CityDraft {
        CityDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            state: relation_id(self.state.as_ref()),
            status: self.status,
        }
    }
}

// =============================================================================
// Warehouse
// =============================================================================

/// A Warehouse, bound to a City and a State.
///
/// Nothing here checks that the City belongs to the State; the warehouse
/// form guards that through its dependent select (see `form`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    #[serde(rename = "_id")]
    pub id: ResourceId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub status: Status,

    #[serde(default)]
    pub city: Option<Relation>,

    #[serde(default)]
    pub state: Option<Relation>,
}

impl Warehouse {
    pub fn city_name(&self) -> &str {
        relation_display(self.city.as_ref())
    }

    pub fn state_name(&self) -> &str {
        relation_display(self.state.as_ref())
    }
}

/// Create/update body for a Warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseDraft {
    pub name: String,
    pub city: ResourceId,
    pub state: ResourceId,
    pub status: Status,
}

impl Resource for Warehouse {
    type Draft = WarehouseDraft;

    const KIND: ResourceKind = ResourceKind::Warehouse;
    const SORT_KEYS: &'static [SortKey] = &[
        SortKey::Id,
        SortKey::Name,
        SortKey::City,
        SortKey::State,
        SortKey::Status,
    ];

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn sort_text(&self, key: SortKey) -> Option<&str> {
        match key {
            SortKey::Id => Some(self.id.as_str()),
            SortKey::Name => Some(self.name.as_str()),
            SortKey::City => self.city.as_ref().and_then(Relation::name),
            SortKey::State => self.state.as_ref().and_then(Relation::name),
            SortKey::Status => Some(self.status.as_str()),
            SortKey::Code => None,
        }
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.city.as_ref().and_then(Relation::name));
        fields.extend(self.state.as_ref().and_then(Relation::name));
        fields
    }

    fn to_draft(&self) -> WarehouseDraft {
        WarehouseDraft {
            name: self.name.clone(),
            city: relation_id(self.city.as_ref()),
            state: relation_id(self.state.as_ref()),
            status: self.status,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_default_and_parsing() {
        assert_eq!(Status::default(), Status::Active);
        assert_eq!("inactive".parse::<Status>().unwrap(), Status::Inactive);
        assert!("Archived".parse::<Status>().is_err());
    }

    #[test]
    fn test_state_wire_shape() {
        let state: State = serde_json::from_value(json!({
            "_id": "64a1",
            "name": "Texas",
            "code": "TX",
            "status": "Inactive"
        }))
        .unwrap();
        assert_eq!(state.id.as_str(), "64a1");
        assert_eq!(state.status, Status::Inactive);

        let body = serde_json::to_value(&state).unwrap();
        assert_eq!(body["_id"], "64a1");
        assert_eq!(body["status"], "Inactive");
    }

    #[test]
    fn test_city_with_embedded_state() {
        let city: City = serde_json::from_value(json!({
            "_id": "c1",
            "name": "Austin",
            "code": "AUS",
            "status": "Active",
            "state": { "_id": "s1", "name": "Texas", "code": "TX" }
        }))
        .unwrap();
        assert_eq!(city.state_name(), "Texas");
        assert_eq!(city.to_draft().state.as_str(), "s1");
    }

    #[test]
    fn test_city_with_bare_state_id() {
        let city: City = serde_json::from_value(json!({
            "_id": "c1",
            "name": "Austin",
            "code": "AUS",
            "state": "s1"
        }))
        .unwrap();
        assert_eq!(city.state, Some(Relation::Id(ResourceId::new("s1"))));
        assert_eq!(city.state_name(), NOT_AVAILABLE);
        assert_eq!(city.status, Status::Active);
    }

    #[test]
    fn test_warehouse_missing_relations_render_not_available() {
        let warehouse: Warehouse = serde_json::from_value(json!({
            "_id": "w1",
            "name": "North Depot",
            "status": "Active",
            "city": null
        }))
        .unwrap();
        assert_eq!(warehouse.city_name(), NOT_AVAILABLE);
        assert_eq!(warehouse.state_name(), NOT_AVAILABLE);
        assert_eq!(warehouse.search_fields(), vec!["North Depot"]);
    }

    #[test]
    fn test_draft_sends_relation_ids() {
        let draft = WarehouseDraft {
            name: "North Depot".to_string(),
            city: ResourceId::new("c1"),
            state: ResourceId::new("s1"),
            status: Status::Active,
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            body,
            json!({ "name": "North Depot", "city": "c1", "state": "s1", "status": "Active" })
        );
    }
}
