//! # App Context
//!
//! Everything a command flow needs, built once at startup and dropped at
//! exit: configuration, the three resource stores, and the auth client.
//! There is no global store; flows receive `&AppContext`.

use std::time::Duration;

use depot_client::{ApiClient, AuthClient, DepotConfig, ResourceClient, TokenAccessor};
use depot_core::{City, Resource, State, Warehouse};
use tracing::info;

use crate::error::ConsoleResult;
use crate::render::TableRow;
use crate::state::ResourceStore;

/// Application state shared by all flows.
#[derive(Clone)]
pub struct AppContext {
    config: DepotConfig,
    api: ApiClient,
    auth: AuthClient,
    pub states: ResourceStore<State>,
    pub cities: ResourceStore<City>,
    pub warehouses: ResourceStore<Warehouse>,
}

impl AppContext {
    /// Builds the context from a loaded configuration.
    pub fn new(config: DepotConfig) -> ConsoleResult<Self> {
        let api = ApiClient::from_config(&config)?;
        Ok(Self::with_api(config, api))
    }

    /// Builds the context around an existing API client.
    pub fn with_api(config: DepotConfig, api: ApiClient) -> Self {
        info!(base_url = %api.base_url(), "Console context ready");
        AppContext {
            auth: AuthClient::new(api.clone()),
            states: ResourceStore::new(ResourceClient::new(api.clone())),
            cities: ResourceStore::new(ResourceClient::new(api.clone())),
            warehouses: ResourceStore::new(ResourceClient::new(api.clone())),
            config,
            api,
        }
    }

    pub fn config(&self) -> &DepotConfig {
        &self.config
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn tokens(&self) -> &TokenAccessor {
        self.api.tokens()
    }

    /// Presence-only check used by the auth gate.
    pub fn has_token(&self) -> bool {
        self.tokens().has_token()
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.config.redirect_delay_ms())
    }
}

/// A resource the console manages: it renders as a table row and has a
/// store in the [`AppContext`].
pub trait CatalogResource: Resource + TableRow {
    fn store(ctx: &AppContext) -> &ResourceStore<Self>;
}

impl CatalogResource for State {
    fn store(ctx: &AppContext) -> &ResourceStore<Self> {
        &ctx.states
    }
}

impl CatalogResource for City {
    fn store(ctx: &AppContext) -> &ResourceStore<Self> {
        &ctx.cities
    }
}

impl CatalogResource for Warehouse {
    fn store(ctx: &AppContext) -> &ResourceStore<Self> {
        &ctx.warehouses
    }
}

/// Context against a test server, with no redirect delay.
#[cfg(test)]
pub(crate) fn test_context(base_url: &str, token: Option<&str>) -> AppContext {
    let mut config = DepotConfig::default();
    config.api.base_url = base_url.to_string();
    config.console.redirect_delay_ms = 0;
    let api = ApiClient::new(base_url, TokenAccessor::in_memory(token)).expect("test api client");
    AppContext::with_api(config, api)
}
