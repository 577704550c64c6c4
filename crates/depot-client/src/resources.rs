//! # Resource Client
//!
//! Typed CRUD over `/api/<resource>` for any [`Resource`].
//!
//! | Operation | Request | Response |
//! |---|---|---|
//! | `list` | `GET /api/<kind>` | `{ "data": [record, ...] }` |
//! | `get` | `GET /api/<kind>/<id>` | record |
//! | `create` | `POST /api/<kind>` + draft | created record |
//! | `update` | `PUT /api/<kind>/<id>` + draft | updated record |
//! | `delete` | `DELETE /api/<kind>/<id>` | ignored |

use std::marker::PhantomData;

use depot_core::{City, Resource, ResourceId};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ClientResult;
use crate::http::ApiClient;

/// List responses wrap the records in a `data` field.
#[derive(Debug, Deserialize)]
struct ListEnvelope<R> {
    data: Vec<R>,
}

/// HTTP client for one resource type.
pub struct ResourceClient<R: Resource> {
    api: ApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> std::fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("kind", &R::KIND)
            .field("base_url", &self.api.base_url().as_str())
            .finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    fn collection_path() -> String {
        format!("/api/{}", R::KIND.path())
    }

    fn item_path(id: &ResourceId) -> String {
        format!("/api/{}/{}", R::KIND.path(), id)
    }

    /// Every record, in server order.
    pub async fn list(&self) -> ClientResult<Vec<R>> {
        self.list_with(&[]).await
    }

    async fn list_with(&self, query: &[(&str, &str)]) -> ClientResult<Vec<R>> {
        let envelope: ListEnvelope<R> = self.api.get(&Self::collection_path(), query).await?;
        debug!(kind = %R::KIND, count = envelope.data.len(), "Fetched list");
        Ok(envelope.data)
    }

    pub async fn get(&self, id: &ResourceId) -> ClientResult<R> {
        self.api.get(&Self::item_path(id), &[]).await
    }

    pub async fn create(&self, draft: &R::Draft) -> ClientResult<R> {
        let created: R = self.api.post(&Self::collection_path(), draft).await?;
        info!(kind = %R::KIND, id = %created.id(), "Created record");
        Ok(created)
    }

    pub async fn update(&self, id: &ResourceId, draft: &R::Draft) -> ClientResult<R> {
        let updated: R = self.api.put(&Self::item_path(id), draft).await?;
        info!(kind = %R::KIND, id = %updated.id(), "Updated record");
        Ok(updated)
    }

    pub async fn delete(&self, id: &ResourceId) -> ClientResult<()> {
        self.api.delete(&Self::item_path(id)).await?;
        info!(kind = %R::KIND, id = %id, "Deleted record");
        Ok(())
    }
}

impl ResourceClient<City> {
    /// Cities of one State, for the warehouse form's dependent select.
    pub async fn list_by_state(&self, state: &ResourceId) -> ClientResult<Vec<City>> {
        self.list_with(&[("state", state.as_str())]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::token::TokenAccessor;
    use depot_core::{State, StateDraft, Status, Warehouse};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client<R: Resource>(server: &MockServer) -> ResourceClient<R> {
        let api = ApiClient::new(&server.uri(), TokenAccessor::in_memory(Some("tok"))).unwrap();
        ResourceClient::new(api)
    }

    #[tokio::test]
    async fn test_list_unwraps_data_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/state"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "_id": "2", "name": "Utah", "code": "UT", "status": "Active" },
                    { "_id": "1", "name": "Texas", "code": "TX", "status": "Inactive" }
                ]
            })))
            .mount(&server)
            .await;

        let states = client::<State>(&server).list().await.unwrap();
        let ids: Vec<&str> = states.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(states[1].status, Status::Inactive);
    }

    #[tokio::test]
    async fn test_create_posts_draft() {
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

        let draft = StateDraft {
            name: "Ohio".to_string(),
            code: "OH".to_string(),
            status: Status::Active,
        };
        let created = client::<State>(&server).create(&draft).await.unwrap();
        assert_eq!(created.id, ResourceId::new("42"));
    }

    #[tokio::test]
    async fn test_update_puts_to_item_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/state/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "7", "name": "Texas", "code": "TEX", "status": "Active"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let draft = StateDraft {
            name: "Texas".to_string(),
            code: "TEX".to_string(),
            status: Status::Active,
        };
        let updated = client::<State>(&server)
            .update(&ResourceId::new("7"), &draft)
            .await
            .unwrap();
        assert_eq!(updated.code, "TEX");
    }

    #[tokio::test]
    async fn test_delete_and_get_paths() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/warehouse/w1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "deleted" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/warehouse/w2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_id": "w2", "name": "South", "status": "Active", "city": null, "state": "s1"
            })))
            .mount(&server)
            .await;

        let warehouses = client::<Warehouse>(&server);
        warehouses.delete(&ResourceId::new("w1")).await.unwrap();

        let fetched = warehouses.get(&ResourceId::new("w2")).await.unwrap();
        assert_eq!(fetched.city_name(), depot_core::NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn test_cities_by_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/city"))
            .and(query_param("state", "s9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let cities = client::<City>(&server)
            .list_by_state(&ResourceId::new("s9"))
            .await
            .unwrap();
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/city"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client::<City>(&server).list().await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 500, .. }));
    }
}
