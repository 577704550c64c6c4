//! Add and edit pages for Cities.
//!
//! The City form offers every State as an option; the list is fetched when
//! the page opens. A failed fetch is reported but does not block the form.

use depot_core::form::{CityForm, ResourceForm};
use depot_core::{Notification, ResourceId, ResourceKind, Route, Status};
use tracing::warn;

use super::{form, gate, Screen};
use crate::error::ConsoleResult;
use crate::render;
use crate::state::AppContext;

#[derive(Debug, Clone, Default)]
pub struct CityInput {
    pub name: Option<String>,
    pub code: Option<String>,
    pub state: Option<ResourceId>,
    pub status: Option<Status>,
}

impl CityInput {
    fn apply(&self, form: &mut CityForm) {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(code) = &self.code {
            form.code = code.clone();
        }
        if let Some(state) = &self.state {
            form.state = Some(state.clone());
        }
        if let Some(status) = self.status.filter(|_| form.mode().is_editing()) {
            form.status = status;
        }
    }
}

/// Fills the State select. Returns the notification to show on failure.
async fn load_state_options(ctx: &AppContext, form: &mut CityForm) -> Option<Notification> {
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

async fn open_and_submit(ctx: &AppContext, mut city_form: CityForm, input: &CityInput) -> ConsoleResult<Screen> {
    let earlier: Vec<Notification> = load_state_options(ctx, &mut city_form).await.into_iter().collect();
    input.apply(&mut city_form);
    Ok(form::submit(ctx, &city_form).await?.after(earlier))
}

pub async fn add(ctx: &AppContext, input: &CityInput) -> ConsoleResult<Screen> {
    if let Some(redirect) = gate(ctx, Route::Form(ResourceKind::City)) {
        return Ok(redirect);
    }
    open_and_submit(ctx, CityForm::create(), input).await
}

pub async fn edit(ctx: &AppContext, id: &ResourceId, input: &CityInput) -> ConsoleResult<Screen> {
    let route = Route::Form(ResourceKind::City);
    if let Some(redirect) = gate(ctx, route) {
        return Ok(redirect);
    }

    match ctx.cities.get_by_id(id).await {
        Ok(record) => open_and_submit(ctx, CityForm::edit(&record), input).await,
        Err(_) => Ok(Screen::new(route, render::error_page())),
    }
}
