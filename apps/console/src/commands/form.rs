//! # Form Submit
//!
//! Shared submit path of the add and edit pages.
//!
//! ```text
//!  submit(form)
//!     │
//!     ├── required checks fail ──► form page + error notification
//!     │
//!     ├── create / update fails ──► form page (still filled) + error notification
//!     │
//!     └── success ──► notification ──► sleep(redirect_delay) ──► list page
//! ```

use depot_core::form::{FormMode, ResourceForm};
use depot_core::{Notification, Resource, Route};
use tracing::{info, warn};

use super::list::{self, ListOptions};
use super::{gate, Screen};
use crate::error::{ConsoleError, ConsoleResult};
use crate::render::{self, FormFields};
use crate::state::{AppContext, CatalogResource};

/// The form page as it stands, with a notification on top.
pub(crate) fn form_screen<F>(form: &F, notification: Notification) -> Screen
where
    F: ResourceForm + FormFields,
{
    Screen::new(Route::Form(F::Target::KIND), render::form(form)).notify(notification)
}

/// Validates and writes a form, then returns to the list.
pub async fn submit<F>(ctx: &AppContext, form: &F) -> ConsoleResult<Screen>
where
    F: ResourceForm + FormFields,
    F::Target: CatalogResource,
{
    let kind = F::Target::KIND;
    if let Some(redirect) = gate(ctx, Route::Form(kind)) {
        return Ok(redirect);
    }

    let submission = match form.submit() {
        Ok(submission) => submission,
        Err(e) => {
            let err = ConsoleError::from(e);
            return Ok(form_screen(form, Notification::error(err.user_message())));
        }
    };

    let store = F::Target::store(ctx);
    let written = match &submission.mode {
        FormMode::Create => store.create(&submission.draft).await.map(|_| "added"),
        FormMode::Edit(id) => store.update(id, &submission.draft).await.map(|_| "updated"),
    };

    match written {
        Ok(verb) => {
            info!(kind = %kind, verb, "Form saved");
            let saved = Notification::success(format!("{} {} successfully!", kind.label(), verb));
            tokio::time::sleep(ctx.redirect_delay()).await;
            let screen = list::show::<F::Target>(ctx, &ListOptions::default()).await?;
            Ok(screen.after(vec![saved]))
        }
        Err(e) => {
            warn!(kind = %kind, error = %e, "Form save failed");
            let message = format!("Failed to save {}. Please try again.", kind.label().to_lowercase());
            Ok(form_screen(form, Notification::error(message)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_context;
    use depot_core::form::StateForm;
    use depot_core::{ResourceKind, State, Status};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn ohio() -> StateForm {
        let mut form = StateForm::create();
        form.name = "Ohio".to_string();
        form.code = "OH".to_string();
        form
    }

    #[tokio::test]
    async fn test_create_then_return_to_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/state"))
            .and(body_json(json!({ "name": "Ohio", "code": "OH", "status": "Active" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "_id": "42", "name": "Ohio", "code": "OH", "status": "Active"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "_id": "42", "name": "Ohio", "code": "OH", "status": "Active" }]
            })))
            .mount(&server)
            .await;

        let ctx = test_context(&server.uri(), Some("tok"));
        let screen = submit(&ctx, &ohio()).await.unwrap();

        assert_eq!(screen.route, Route::List(ResourceKind::State));
        assert_eq!(screen.notifications[0].message, "State added successfully!");
        assert!(screen.body.contains("Ohio"));
        assert_eq!(ctx.states.items().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_field_stays_on_form_without_request() {
        let server = MockServer::start().await;
        let ctx = test_context(&server.uri(), Some("tok"));

        let mut form = ohio();
        form.code = "  ".to_string();
        let screen = submit(&ctx, &form).await.unwrap();

        assert_eq!(screen.route, Route::Form(ResourceKind::State));
        assert!(screen.has_error());
        assert!(screen.body.contains("Ohio"));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_form() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/state/7"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let ctx = test_context(&server.uri(), Some("tok"));
        let record = State {
            id: depot_core::ResourceId::new("7"),
            name: "Texas".to_string(),
            code: "TX".to_string(),
            status: Status::Inactive,
        };
        let screen = submit(&ctx, &StateForm::edit(&record)).await.unwrap();

        assert_eq!(screen.route, Route::Form(ResourceKind::State));
        assert_eq!(screen.notifications[0].message, "Failed to save state. Please try again.");
        assert!(screen.body.starts_with("Edit State"));
        assert!(screen.body.contains("Inactive"));
    }
}
