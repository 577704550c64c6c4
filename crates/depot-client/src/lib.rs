//! # depot-client: Catalog API Client
//!
//! HTTP access to the catalog API plus the local state the console keeps:
//! its configuration file and the bearer token.
//!
//! ## Modules
//!
//! - [`config`] - `DepotConfig` (TOML file + `DEPOT_*` env overrides)
//! - [`token`] - Token stores and the persistent-then-session accessor
//! - [`http`] - `ApiClient`: base URL, bearer header, status handling
//! - [`resources`] - `ResourceClient<R>` CRUD for State, City, Warehouse
//! - [`auth`] - Login, registration, password reset, logout
//! - [`error`] - `ClientError`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use depot_client::{ApiClient, DepotConfig, ResourceClient};
//! use depot_core::State;
//!
//! # async fn example() -> depot_client::ClientResult<()> {
//! let config = DepotConfig::load(None, None)?;
//! let api = ApiClient::from_config(&config)?;
//! let states: ResourceClient<State> = ResourceClient::new(api);
//! for state in states.list().await? {
//!     println!("{} {}", state.code, state.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod resources;
pub mod token;

pub use auth::AuthClient;
pub use config::DepotConfig;
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use resources::ResourceClient;
pub use token::{EnvTokenStore, FileTokenStore, MemoryTokenStore, TokenAccessor, TokenStore};
