//! # Form State
//!
//! Create and edit forms for the three resource types.
//!
//! ## Form Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Add button ──► Form::create()      (empty, status = Active)            │
//! │  Edit button ─► Form::edit(&record) (pre-filled, FormMode::Edit(id))    │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │                 field edits                                             │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │                 submit() ──► required checks ──► FormSubmission         │
//! │                                                   { mode, draft }       │
//! │                                                                         │
//! │  The console turns a submission into store.create(draft) or            │
//! │  store.update(id, draft); a failed write leaves the form as it was.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Warehouse Dependent Select
//! ```text
//!  select_state(Some(s)) ──► city cleared, options cleared ──► caller fetches
//!                                                              /api/city?state=s
//!  set_city_options(s, cities) ──► options replaced (ignored if s is stale)
//!  select_state(None) ──► city cleared, options cleared, nothing to fetch
//!  select_city(c) ──► c must be one of the options
//! ```

use crate::error::{CoreResult, ValidationError};
use crate::resource::Resource;
use crate::types::{
    City, CityDraft, Relation, ResourceId, State, StateDraft, Status, Warehouse, WarehouseDraft,
};
use crate::validation::require;

// =============================================================================
// Shared Form Types
// =============================================================================

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ResourceId),
}

impl FormMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, FormMode::Edit(_))
    }
}

/// A validated form, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission<D> {
    pub mode: FormMode,
    pub draft: D,
}

/// One entry of a select box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: ResourceId,
    pub name: String,
}

impl SelectOption {
    pub fn from_resource<R: Resource>(record: &R) -> Self {
        SelectOption {
            id: record.id().clone(),
            name: record.name().to_string(),
        }
    }
}

/// Behaviour shared by the three resource forms.
pub trait ResourceForm {
    type Target: Resource;

    fn mode(&self) -> &FormMode;

    /// Page heading, e.g. "Add State" or "Edit Warehouse".
    fn title(&self) -> String {
        let verb = if self.mode().is_editing() { "Edit" } else { "Add" };
        format!("{} {}", verb, Self::Target::KIND.label())
    }

    /// Runs the required-field checks and builds the request body.
    fn submit(&self) -> CoreResult<FormSubmission<<Self::Target as Resource>::Draft>>;
}

fn required_id(field: &str, id: Option<&ResourceId>) -> Result<ResourceId, ValidationError> {
    match id {
        Some(id) if !id.as_str().trim().is_empty() => Ok(id.clone()),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

fn relation_id(relation: Option<&Relation>) -> Option<ResourceId> {
    relation.and_then(Relation::id).cloned()
}

// =============================================================================
// State Form
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct StateForm {
    mode: FormMode,
    pub name: String,
    pub code: String,
    pub status: Status,
}

impl StateForm {
    pub fn create() -> Self {
        StateForm {
            mode: FormMode::Create,
            name: String::new(),
            code: String::new(),
            status: Status::Active,
        }
    }

    pub fn edit(state: &State) -> Self {
        let draft = state.to_draft();
        StateForm {
            mode: FormMode::Edit(state.id.clone()),
            name: draft.name,
            code: draft.code,
            status: draft.status,
        }
    }
}

impl ResourceForm for StateForm {
    type Target = State;

    fn mode(&self) -> &FormMode {
        &self.mode
    }

    fn submit(&self) -> CoreResult<FormSubmission<StateDraft>> {
        let draft = StateDraft {
            name: require("name", &self.name)?,
            code: require("code", &self.code)?,
            status: self.status,
        };
        Ok(FormSubmission {
            mode: self.mode.clone(),
            draft,
        })
    }
}

// =============================================================================
// City Form
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct CityForm {
    mode: FormMode,
    pub name: String,
    pub code: String,
    pub state: Option<ResourceId>,
    pub status: Status,
    state_options: Vec<SelectOption>,
}

impl CityForm {
    pub fn create() -> Self {
        CityForm {
            mode: FormMode::Create,
            name: String::new(),
            code: String::new(),
            state: None,
            status: Status::Active,
            state_options: Vec::new(),
        }
    }

    pub fn edit(city: &City) -> Self {
        CityForm {
            mode: FormMode::Edit(city.id.clone()),
            name: city.name.clone(),
            code: city.code.clone(),
            state: relation_id(city.state.as_ref()),
            status: city.status,
            state_options: Vec::new(),
        }
    }

    pub fn set_state_options(&mut self, states: &[State]) {
        self.state_options = states.iter().map(SelectOption::from_resource).collect();
    }

    pub fn state_options(&self) -> &[SelectOption] {
        &self.state_options
    }
}

impl ResourceForm for CityForm {
    type Target = City;

    fn mode(&self) -> &FormMode {
        &self.mode
    }

    fn submit(&self) -> CoreResult<FormSubmission<CityDraft>> {
        let draft = CityDraft {
            name: require("name", &self.name)?,
            code: require("code", &self.code)?,
            state: required_id("state", self.state.as_ref())?,
            status: self.status,
        };
        Ok(FormSubmission {
            mode: self.mode.clone(),
            draft,
        })
    }
}

// =============================================================================
// Warehouse Form
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseForm {
    mode: FormMode,
    pub name: String,
    pub status: Status,
    state: Option<ResourceId>,
    city: Option<ResourceId>,
    state_options: Vec<SelectOption>,
    city_options: Vec<SelectOption>,
}

impl WarehouseForm {
    pub fn create() -> Self {
        WarehouseForm {
            mode: FormMode::Create,
            name: String::new(),
            status: Status::Active,
            state: None,
            city: None,
            state_options: Vec::new(),
            city_options: Vec::new(),
        }
    }

    /// Pre-fills from a record. The caller should then fetch the cities of
    /// [`Self::state`] and hand them to [`Self::set_city_options`].
    pub fn edit(warehouse: &Warehouse) -> Self {
        WarehouseForm {
            mode: FormMode::Edit(warehouse.id.clone()),
            name: warehouse.name.clone(),
            status: warehouse.status,
            state: relation_id(warehouse.state.as_ref()),
            city: relation_id(warehouse.city.as_ref()),
            state_options: Vec::new(),
            city_options: Vec::new(),
        }
    }

    pub fn state(&self) -> Option<&ResourceId> {
        self.state.as_ref()
    }

    pub fn city(&self) -> Option<&ResourceId> {
        self.city.as_ref()
    }

    pub fn state_options(&self) -> &[SelectOption] {
        &self.state_options
    }

    pub fn city_options(&self) -> &[SelectOption] {
        &self.city_options
    }

    pub fn set_state_options(&mut self, states: &[State]) {
        self.state_options = states.iter().map(SelectOption::from_resource).collect();
    }

    /// Changes the selected State.
    ///
    /// Returns the State whose Cities must now be fetched, or `None` when
    /// the selection was cleared (options and City are then already empty).
    pub fn select_state(&mut self, state: Option<ResourceId>) -> Option<ResourceId> {
        let state = state.filter(|id| !id.as_str().trim().is_empty());
        if state != self.state {
            self.city = None;
        }
        self.city_options.clear();
        self.state = state;
        self.state.clone()
    }

    /// Installs the Cities fetched for `state`.
    ///
    /// A response for a State that is no longer selected is dropped. A City
    /// selection that is not among the new options is cleared.
    pub fn set_city_options(&mut self, state: &ResourceId, cities: &[City]) -> bool {
        if self.state.as_ref() != Some(state) {
            return false;
        }
        self.city_options = cities.iter().map(SelectOption::from_resource).collect();
        if let Some(city) = &self.city {
            if !self.has_city_option(city) {
                self.city = None;
            }
        }
        true
    }

    /// Chooses a City from the current options.
    pub fn select_city(&mut self, city: ResourceId) -> Result<(), ValidationError> {
        if !self.has_city_option(&city) {
            return Err(self.city_not_in_state(&city));
        }
        self.city = Some(city);
        Ok(())
    }

    fn has_city_option(&self, city: &ResourceId) -> bool {
        self.city_options.iter().any(|option| &option.id == city)
    }

    fn city_not_in_state(&self, city: &ResourceId) -> ValidationError {
        ValidationError::CityNotInState {
            city: city.to_string(),
            state: self
                .state
                .as_ref()
                .map(ResourceId::to_string)
                .unwrap_or_default(),
        }
    }
}

impl ResourceForm for WarehouseForm {
    type Target = Warehouse;

    fn mode(&self) -> &FormMode {
        &self.mode
    }

    fn submit(&self) -> CoreResult<FormSubmission<WarehouseDraft>> {
        let name = require("name", &self.name)?;
        let state = required_id("state", self.state.as_ref())?;
        let city = required_id("city", self.city.as_ref())?;
        if !self.has_city_option(&city) {
            return Err(self.city_not_in_state(&city).into());
        }

        Ok(FormSubmission {
            mode: self.mode.clone(),
            draft: WarehouseDraft {
                name,
                city,
                state,
                status: self.status,
            },
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
