//! # Command Flows
//!
//! One module per page family. Each flow takes `&AppContext`, talks to the
//! stores and clients, and returns the [`Screen`] to print.
//!
//! ## Structure
//! - `list` - Generic table page: gate, fetch, derive, render, delete
//! - `form` - Generic submit: validate, write, notify, return to the list
//! - `state` / `city` / `warehouse` - Add and edit pages per resource
//! - `auth` - Login, register, password reset, logout, home

pub mod auth;
pub mod city;
pub mod form;
pub mod list;
pub mod state;
pub mod warehouse;

use depot_core::navigation::auth_gate;
use depot_core::{Notification, Route};
use tracing::debug;

use crate::render;
use crate::state::AppContext;

/// The result of one flow: where the operator ended up and what to show.
#[derive(Debug, Clone)]
pub struct Screen {
    pub route: Route,
    pub body: String,
    pub notifications: Vec<Notification>,
}

impl Screen {
    pub fn new(route: Route, body: impl Into<String>) -> Self {
        Screen {
            route,
            body: body.into(),
            notifications: Vec::new(),
        }
    }

    pub fn notify(mut self, notification: Notification) -> Self {
        self.notifications.push(notification);
        self
    }

    /// Prepends notifications raised before this screen was reached.
    pub fn after(mut self, mut earlier: Vec<Notification>) -> Self {
        earlier.append(&mut self.notifications);
        self.notifications = earlier;
        self
    }

    pub fn has_error(&self) -> bool {
        self.notifications.iter().any(Notification::is_error)
    }

    /// The login page shown when a protected page is opened without a token.
    pub fn login_redirect() -> Self {
        Screen::new(Route::Login, render::login_prompt())
    }
}

/// Runs the auth gate for `route`; `Some` is the redirect screen.
pub(crate) fn gate(ctx: &AppContext, route: Route) -> Option<Screen> {
    let redirect = auth_gate(route, ctx.has_token())?;
    debug!(from = %route, to = %redirect, "No token, redirecting");
    Some(Screen::login_redirect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::ResourceKind;

    #[test]
    fn test_after_orders_notifications() {
        let screen = Screen::new(Route::Home, "")
            .notify(Notification::error("second"))
            .after(vec![Notification::success("first")]);
        let messages: Vec<&str> = screen.notifications.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert!(screen.has_error());
    }

    #[test]
    fn test_gate_only_blocks_protected_routes() {
        let ctx = crate::state::test_context("http://localhost:4000", None);
        assert!(gate(&ctx, Route::List(ResourceKind::State)).is_some());
        assert!(gate(&ctx, Route::Register).is_none());

        let ctx = crate::state::test_context("http://localhost:4000", Some("tok"));
        assert!(gate(&ctx, Route::Home).is_none());
    }
}
