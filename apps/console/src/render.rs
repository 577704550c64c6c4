//! # Rendering
//!
//! Turns screens, tables and forms into terminal text. Every function here
//! returns a `String`; only `main` writes to stdout.
//!
//! ## Layout
//! ```text
//! Depot Admin                                             [logout]
//! ────────────────────────────────────────────────────────────────
//!   Home
//! > State          ◄── active entry (forms mark their list)
//!   City
//!   Warehouse
//! ────────────────────────────────────────────────────────────────
//! <notifications>
//! <body>
//! ```

use depot_core::form::{CityForm, ResourceForm, SelectOption, StateForm, WarehouseForm};
use depot_core::navigation::{active_menu_item, MENU};
use depot_core::{City, Notification, NotificationKind, ResourceKind, Route, State, Warehouse};

use crate::commands::Screen;
use crate::error::GENERIC_FAILURE;

/// Console title shown in the header.
pub const TITLE: &str = "Depot Admin";

const RULE_WIDTH: usize = 64;

// =============================================================================
// Table Rows
// =============================================================================

/// How a record renders as a table row.
pub trait TableRow {
    const HEADERS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

impl TableRow for State {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Code", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.code.clone(),
            self.status.to_string(),
        ]
    }
}

impl TableRow for City {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Code", "State", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.code.clone(),
            self.state_name().to_string(),
            self.status.to_string(),
        ]
    }
}

impl TableRow for Warehouse {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "State", "City", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.state_name().to_string(),
            self.city_name().to_string(),
            self.status.to_string(),
        ]
    }
}

/// Renders rows as an aligned text table.
pub fn table<R: TableRow>(rows: &[&R]) -> String {
    let cells: Vec<Vec<String>> = rows.iter().map(|row| row.cells()).collect();

    let mut widths: Vec<usize> = R::HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let headers: Vec<String> = R::HEADERS.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &headers, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &separator, &widths);

    if cells.is_empty() {
        out.push_str("No records found\n");
    }
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

// =============================================================================
// Pages
// =============================================================================

pub fn loading_page(kind: ResourceKind) -> String {
    format!("Loading {}...", kind.label())
}

/// Generic failure page; the detail only goes to the log.
pub fn error_page() -> String {
    format!("{}\nRun the command again, or check the log with RUST_LOG=debug.\n", GENERIC_FAILURE)
}

pub fn home_page() -> String {
    format!(
        "Welcome to {}\nToday is {}. Pick State, City or Warehouse from the menu.\n",
        TITLE,
        chrono::Local::now().format("%A, %d %B %Y")
    )
}

pub fn login_prompt() -> String {
    "You are not logged in. Run `depot-console login --email <EMAIL> --password <PASSWORD>`.\n".to_string()
}

pub fn notification(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
    };
    format!(
        "[{} {}] {}",
        notification.issued_at.format("%H:%M:%S"),
        marker,
        notification.message
    )
}

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// Header and side menu; public pages get neither.
pub fn layout(route: Route) -> String {
    if !route.is_protected() {
        return String::new();
    }

    let mut out = format!("{:<width$}[logout]\n", TITLE, width = RULE_WIDTH - 8);
    out.push_str(&rule());
    out.push('\n');

    let active = active_menu_item(route).map(|item| item.route);
    for item in MENU.iter() {
        let marker = if Some(item.route) == active { ">" } else { " " };
        out.push_str(&format!("{} {}\n", marker, item.label));
    }
    out.push_str(&rule());
    out.push('\n');
    out
}

/// The full text of a screen.
pub fn screen(screen: &Screen) -> String {
    let mut out = layout(screen.route);
    for note in &screen.notifications {
        out.push_str(&notification(note));
        out.push('\n');
    }
    out.push_str(&screen.body);
    out
}

// =============================================================================
// Forms
// =============================================================================

/// Field values of a form, in display order.
pub trait FormFields {
    fn fields(&self) -> Vec<(&'static str, String)>;
}

fn option_label(options: &[SelectOption], id: Option<&depot_core::ResourceId>) -> String {
    match id {
        None => String::new(),
        Some(id) => options
            .iter()
            .find(|option| &option.id == id)
            .map(|option| format!("{} ({})", option.name, id))
            .unwrap_or_else(|| id.to_string()),
    }
}

impl FormFields for StateForm {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Code", self.code.clone()),
            ("Status", self.status.to_string()),
        ]
    }
}

impl FormFields for CityForm {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Code", self.code.clone()),
            ("State", option_label(self.state_options(), self.state.as_ref())),
            ("Status", self.status.to_string()),
        ]
    }
}

impl FormFields for WarehouseForm {
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("State", option_label(self.state_options(), self.state())),
            ("City", option_label(self.city_options(), self.city())),
            ("Status", self.status.to_string()),
        ]
    }
}

/// Renders a form with its title and current values.
pub fn form<F: ResourceForm + FormFields>(form: &F) -> String {
    let mut out = format!("{}\n", form.title());
    for (label, value) in form.fields() {
        let value = if value.is_empty() { "-".to_string() } else { value };
        out.push_str(&format!("  {:<8} {}\n", label, value));
    }
    out
}

/// Renders select options, one per line.
pub fn options(heading: &str, options: &[SelectOption]) -> String {
    let mut out = format!("{}\n", heading);
    if options.is_empty() {
        out.push_str("  (none)\n");
    }
    for option in options {
        out.push_str(&format!("  {}  {}\n", option.id, option.name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use depot_core::{Relation, ResourceId, Status, NOT_AVAILABLE};

    #[test]
    fn test_table_aligns_and_shows_not_available() {
        let city = City {
            id: ResourceId::new("c1"),
            name: "Austin".to_string(),
            code: "AUS".to_string(),
            status: Status::Active,
            state: Some(Relation::Id(ResourceId::new("s1"))),
        };
        let text = table(&[&city]);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("ID  Name"));
        assert!(lines[2].contains(NOT_AVAILABLE));
        assert!(lines[2].ends_with("Active"));
    }

    #[test]
    fn test_empty_table() {
        let rows: Vec<&State> = Vec::new();
        assert!(table(&rows).contains("No records found"));
    }

    #[test]
    fn test_layout_marks_active_menu_entry() {
        let text = layout(Route::Form(ResourceKind::City));
        assert!(text.starts_with(TITLE));
        assert!(text.contains("> City"));
        assert!(text.contains("  State"));
        assert!(layout(Route::Login).is_empty());
    }

    #[test]
    fn test_notification_marker() {
        let text = notification(&Notification::error("Failed to delete state"));
        assert!(text.contains("error] Failed to delete state"));
    }

    #[test]
    fn test_form_rendering() {
        let mut form = StateForm::create();
        form.name = "Ohio".to_string();
        let text = super::form(&form);
        assert!(text.starts_with("Add State"));
        assert!(text.contains("Ohio"));
        assert!(text.contains("Code     -"));
    }
}
