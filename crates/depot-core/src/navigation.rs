//! # Navigation
//!
//! Routes of the console, the side menu, the auth gate that guards every
//! protected page, and the transient notifications shown after an action.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Public                      Protected (token required)                 │
//! │  ──────                      ──────────────────────────                 │
//! │  Login          /            Home             /home                     │
//! │  Register       /register    List(State)      /state                    │
//! │  ResetPassword  /reset-...   Form(State)      /add-state                │
//! │                              List(City)       /city                     │
//! │                              Form(City)       /add-edit-city            │
//! │                              List(Warehouse)  /warehouse                │
//! │                              Form(Warehouse)  /add-edit-warehouse       │
//! │                                                                         │
//! │  auth_gate(route, has_token): protected + no token ──► Some(Login)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::ResourceKind;

// =============================================================================
// Routes
// =============================================================================

/// A page of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    ResetPassword,
    Home,
    List(ResourceKind),
    Form(ResourceKind),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::ResetPassword => "/reset-password",
            Route::Home => "/home",
            Route::List(ResourceKind::State) => "/state",
            Route::List(ResourceKind::City) => "/city",
            Route::List(ResourceKind::Warehouse) => "/warehouse",
            Route::Form(ResourceKind::State) => "/add-state",
            Route::Form(ResourceKind::City) => "/add-edit-city",
            Route::Form(ResourceKind::Warehouse) => "/add-edit-warehouse",
        }
    }

    /// Whether the page needs a bearer token.
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Register | Route::ResetPassword)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Presence-only token check run before a protected page fetches anything.
///
/// Returns the route to redirect to, or `None` when the page may proceed.
pub fn auth_gate(route: Route, has_token: bool) -> Option<Route> {
    if route.is_protected() && !has_token {
        Some(Route::Login)
    } else {
        None
    }
}

// =============================================================================
// Side Menu
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub route: Route,
}

/// Side menu entries in display order.
pub static MENU: [MenuItem; 4] = [
    MenuItem { label: "Home", route: Route::Home },
    MenuItem { label: "State", route: Route::List(ResourceKind::State) },
    MenuItem { label: "City", route: Route::List(ResourceKind::City) },
    MenuItem { label: "Warehouse", route: Route::List(ResourceKind::Warehouse) },
];

/// The menu entry to highlight for `route`; forms highlight their list.
pub fn active_menu_item(route: Route) -> Option<&'static MenuItem> {
    let target = match route {
        Route::Form(kind) => Route::List(kind),
        other => other,
    };
    MENU.iter().find(|item| item.route == target)
}

// =============================================================================
// Notifications
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient message shown after an action (the toast of the web console).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub issued_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Success,
            message: message.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notification {
            kind: NotificationKind::Error,
            message: message.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_redirects_without_token() {
        assert_eq!(auth_gate(Route::List(ResourceKind::State), false), Some(Route::Login));
        assert_eq!(auth_gate(Route::Form(ResourceKind::Warehouse), false), Some(Route::Login));
        assert_eq!(auth_gate(Route::Home, false), Some(Route::Login));
    }

    #[test]
    fn test_gate_allows_with_token_or_public_page() {
        assert_eq!(auth_gate(Route::List(ResourceKind::City), true), None);
        assert_eq!(auth_gate(Route::Login, false), None);
        assert_eq!(auth_gate(Route::Register, false), None);
    }

    #[test]
    fn test_menu_order_and_active_item() {
        let labels: Vec<&str> = MENU.iter().map(|item| item.label).collect();
        assert_eq!(labels, vec!["Home", "State", "City", "Warehouse"]);

        let active = active_menu_item(Route::Form(ResourceKind::City)).unwrap();
        assert_eq!(active.label, "City");
        assert!(active_menu_item(Route::Login).is_none());
    }

    #[test]
    fn test_notification_kinds() {
        assert!(Notification::error("Failed to delete state").is_error());
        let ok = Notification::success("State added successfully!");
        assert!(!ok.is_error());
        assert_eq!(ok.message, "State added successfully!");
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/");
        assert_eq!(Route::List(ResourceKind::Warehouse).to_string(), "/warehouse");
    }
}
