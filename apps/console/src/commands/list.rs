//! # List Page
//!
//! Table page shared by the three resources.
//!
//! ```text
//!  show::<R>()
//!     │
//!     ├── no token ──────────────► login screen (nothing sent)
//!     │
//!     ├── store.list_all() ── Err ──► generic failure page
//!     │
//!     └── ListView::derive(items) ──► table (or JSON rows)
//! ```
//!
//! Sort and search never touch the store; they only shape what is rendered.

use depot_core::{ListView, Notification, ResourceId, Route};
use tracing::{debug, info};

use super::{gate, Screen};
use crate::error::{ConsoleError, ConsoleResult};
use crate::render;
use crate::state::{AppContext, CatalogResource};

/// How the table should be shaped and printed.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub view: ListView,
    /// Print the derived rows as JSON instead of a table
    pub json: bool,
}

impl ListOptions {
    pub fn new(view: ListView) -> Self {
        ListOptions { view, json: false }
    }
}

/// Fetches the collection and renders it.
pub async fn show<R: CatalogResource>(ctx: &AppContext, options: &ListOptions) -> ConsoleResult<Screen> {
    let route = Route::List(R::KIND);
    if let Some(redirect) = gate(ctx, route) {
        return Ok(redirect);
    }

    if let Err(e) = R::store(ctx).list_all().await {
        debug!(kind = %R::KIND, error = %e, "Showing failure page");
        return Ok(Screen::new(route, render::error_page()));
    }

    rows::<R>(ctx, options)
}

/// Renders what is currently cached, without fetching.
pub fn rows<R: CatalogResource>(ctx: &AppContext, options: &ListOptions) -> ConsoleResult<Screen> {
    let items = R::store(ctx).items();
    let rows = options.view.derive(&items)?;

    let body = if options.json {
        let mut json = serde_json::to_string_pretty(&rows)
            .map_err(|e| ConsoleError::internal(format!("Failed to encode rows: {}", e)))?;
        json.push('\n');
        json
    } else {
        render::table(&rows)
    };

    debug!(kind = %R::KIND, shown = rows.len(), total = items.len(), "Rendered list");
    Ok(Screen::new(Route::List(R::KIND), body))
}

/// Fetches one record and shows it as a single-row table.
pub async fn record<R: CatalogResource>(ctx: &AppContext, id: &ResourceId) -> ConsoleResult<Screen> {
    let route = Route::List(R::KIND);
    if let Some(redirect) = gate(ctx, route) {
        return Ok(redirect);
    }

    match R::store(ctx).get_by_id(id).await {
        Ok(record) => Ok(Screen::new(route, render::table(&[&record]))),
        Err(_) => Ok(Screen::new(route, render::error_page())),
    }
}

/// Deletes one record and shows the table without it.
///
/// The collection is loaded first so the table reflects the server's data.
pub async fn delete<R: CatalogResource>(
    ctx: &AppContext,
    id: &ResourceId,
    options: &ListOptions,
) -> ConsoleResult<Screen> {
    let route = Route::List(R::KIND);
    if let Some(redirect) = gate(ctx, route) {
        return Ok(redirect);
    }

    let store = R::store(ctx);
    if store.list_all().await.is_err() {
        return Ok(Screen::new(route, render::error_page()));
    }

    let label = R::KIND.label();
    let notification = match store.delete_by_id(id).await {
        Ok(()) => {
            info!(kind = %R::KIND, %id, "Record deleted");
            Notification::success(format!("{} deleted successfully", label))
        }
        Err(_) => Notification::error(format!("Failed to delete {}", label.to_lowercase())),
    };

    Ok(rows::<R>(ctx, options)?.notify(notification))
}
