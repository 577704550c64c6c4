//! # Warehouse Pages
//!
//! Add and edit pages for Warehouses, with the State → City dependent select.
//!
//! ```text
//!  open form ──► GET /api/state            (State options)
//!      │
//!      ▼
//!  select_state(s) ──► GET /api/city?state=s (City options)
//!      │
//!      ▼
//!  select_city(c)  ──► c must be among the options
//!      │
//!      ▼
//!  form::submit
//! ```

use depot_core::form::{ResourceForm, WarehouseForm};
use depot_core::{Notification, ResourceId, ResourceKind, Route, Status};
use tracing::{debug, warn};

use super::form::{self, form_screen};
use super::{gate, Screen};
use crate::error::{ConsoleError, ConsoleResult};
use crate::render;
use crate::state::AppContext;

const CITY_FETCH_FAILED: &str = "Failed to fetch cities. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct WarehouseInput {
    pub name: Option<String>,
    pub state: Option<ResourceId>,
    pub city: Option<ResourceId>,
    pub status: Option<Status>,
}

/// Fills the State select.
pub async fn load_state_options(ctx: &AppContext, form: &mut WarehouseForm) -> Option<Notification> {
    match ctx.states.list_all().await {
        Ok(()) => {
            form.set_state_options(&ctx.states.items());
            None
        }
        Err(e) => {
            warn!(error = %e, "Could not load state options");
            Some(Notification::error("Failed to fetch states. Please try again."))
        }
    }
}

/// Changes the selected State and fetches its Cities.
///
/// Clearing the State clears the City and its options without a request.
pub async fn select_state(
    ctx: &AppContext,
    form: &mut WarehouseForm,
    state: Option<ResourceId>,
) -> Option<Notification> {
    let state = form.select_state(state)?;

    match ctx.cities.client().list_by_state(&state).await {
        Ok(cities) => {
            let applied = form.set_city_options(&state, &cities);
            debug!(%state, count = cities.len(), applied, "City options loaded");
            None
        }
        Err(e) => {
            warn!(%state, error = %e, "Could not load city options");
            Some(Notification::error(CITY_FETCH_FAILED))
        }
    }
}

async fn open_and_submit(
    ctx: &AppContext,
    mut warehouse_form: WarehouseForm,
    input: &WarehouseInput,
) -> ConsoleResult<Screen> {
    let mut earlier = Vec::new();
    earlier.extend(load_state_options(ctx, &mut warehouse_form).await);

    if let Some(name) = &input.name {
        warehouse_form.name = name.clone();
    }
    if let Some(status) = input.status.filter(|_| warehouse_form.mode().is_editing()) {
        warehouse_form.status = status;
    }

    // An edit without a new State still needs the current State's Cities.
    let state = input.state.clone().or_else(|| warehouse_form.state().cloned());
    earlier.extend(select_state(ctx, &mut warehouse_form, state).await);

    if let Some(city) = &input.city {
        if let Err(e) = warehouse_form.select_city(city.clone()) {
            let err = ConsoleError::from(e);
            return Ok(form_screen(&warehouse_form, Notification::error(err.user_message())).after(earlier));
        }
    }

    Ok(form::submit(ctx, &warehouse_form).await?.after(earlier))
}

pub async fn add(ctx: &AppContext, input: &WarehouseInput) -> ConsoleResult<Screen> {
    if let Some(redirect) = gate(ctx, Route::Form(ResourceKind::Warehouse)) {
        return Ok(redirect);
    }
    open_and_submit(ctx, WarehouseForm::create(), input).await
}

pub async fn edit(ctx: &AppContext, id: &ResourceId, input: &WarehouseInput) -> ConsoleResult<Screen> {
    let route = Route::Form(ResourceKind::Warehouse);
    if let Some(redirect) = gate(ctx, route) {
        return Ok(redirect);
    }

    match ctx.warehouses.get_by_id(id).await {
        Ok(record) => open_and_submit(ctx, WarehouseForm::edit(&record), input).await,
        Err(_) => Ok(Screen::new(route, render::error_page())),
    }
}

/// Shows the City options the form would offer for `state`.
pub async fn city_options(ctx: &AppContext, state: &ResourceId) -> ConsoleResult<Screen> {
    let route = Route::Form(ResourceKind::Warehouse);
    if let Some(redirect) = gate(ctx, route) {
        return Ok(redirect);
    }

    let mut warehouse_form = WarehouseForm::create();
    let failed = select_state(ctx, &mut warehouse_form, Some(state.clone())).await;
    let body = render::options(&format!("Cities of state {}", state), warehouse_form.city_options());

    let screen = Screen::new(route, body);
    Ok(match failed {
        Some(notification) => screen.notify(notification),
        None => screen,
    })
}
