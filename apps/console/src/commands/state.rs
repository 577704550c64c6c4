//! Add and edit pages for States.

use depot_core::form::{ResourceForm, StateForm};
use depot_core::{ResourceId, ResourceKind, Route, Status};

use super::{form, gate, Screen};
use crate::error::ConsoleResult;
use crate::render;
use crate::state::AppContext;

/// Field values given on the command line; `None` leaves a field as is.
///
/// `status` only applies to an edit; a new State is always Active.
#[derive(Debug, Clone, Default)]
pub struct StateInput {
    pub name: Option<String>,
    pub code: Option<String>,
    pub status: Option<Status>,
}

impl StateInput {
    fn apply(&self, form: &mut StateForm) {
        if let Some(name) = &self.name {
            form.name = name.clone();
        }
        if let Some(code) = &self.code {
            form.code = code.clone();
        }
        if let Some(status) = self.status.filter(|_| form.mode().is_editing()) {
            form.status = status;
        }
    }
}

pub async fn add(ctx: &AppContext, input: &StateInput) -> ConsoleResult<Screen> {
    let mut state_form = StateForm::create();
    input.apply(&mut state_form);
    form::submit(ctx, &state_form).await
}

/// Loads the record, applies the changes and saves it.
pub async fn edit(ctx: &AppContext, id: &ResourceId, input: &StateInput) -> ConsoleResult<Screen> {
    let route = Route::Form(ResourceKind::State);
    if let Some(redirect) = gate(ctx, route) {
        return Ok(redirect);
    }

    let record = match ctx.states.get_by_id(id).await {
        Ok(record) => record,
        Err(_) => return Ok(Screen::new(route, render::error_page())),
    };

    let mut state_form = StateForm::edit(&record);
    input.apply(&mut state_form);
    form::submit(ctx, &state_form).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_context;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_edit_sends_prefilled_record_with_changes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/state/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "1", "name": "Texas", "code": "TX", "status": "Active"
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/state/1"))
            .and(body_json(json!({ "name": "Texas", "code": "TX", "status": "Inactive" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "1", "name": "Texas", "code": "TX", "status": "Inactive"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "_id": "1", "name": "Texas", "code": "TX", "status": "Inactive" }]
            })))
            .mount(&server)
            .await;

        let ctx = test_context(&server.uri(), Some("tok"));
        let input = StateInput {
            status: Some(Status::Inactive),
            ..Default::default()
        };
        let screen = edit(&ctx, &ResourceId::new("1"), &input).await.unwrap();

        assert_eq!(screen.route, Route::List(ResourceKind::State));
        assert_eq!(screen.notifications[0].message, "State updated successfully!");
    }

    #[tokio::test]
    async fn test_add_always_posts_active() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/state"))
            .and(body_json(json!({ "name": "Ohio", "code": "OH", "status": "Active" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "_id": "9", "name": "Ohio", "code": "OH", "status": "Active"
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "_id": "9", "name": "Ohio", "code": "OH", "status": "Active" }]
            })))
            .mount(&server)
            .await;

        let ctx = test_context(&server.uri(), Some("tok"));
        let input = StateInput {
            name: Some("Ohio".to_string()),
            code: Some("OH".to_string()),
            status: Some(Status::Inactive),
        };
        let screen = add(&ctx, &input).await.unwrap();

        assert_eq!(screen.route, Route::List(ResourceKind::State));
        assert_eq!(screen.notifications[0].message, "State added successfully!");
    }

    #[tokio::test]
    async fn test_add_without_token_redirects() {
        let server = MockServer::start().await;
        let ctx = test_context(&server.uri(), None);
        let input = StateInput {
            name: Some("Ohio".to_string()),
            code: Some("OH".to_string()),
            status: None,
        };

        let screen = add(&ctx, &input).await.unwrap();
        assert_eq!(screen.route, Route::Login);
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
