//! # State Module
//!
//! Runtime state of the console.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │                         AppContext                                      │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ states       │  │ cities       │  │ warehouses       │              │
//! │  │ ResourceStore│  │ ResourceStore│  │ ResourceStore    │              │
//! │  │ <State>      │  │ <City>       │  │ <Warehouse>      │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Each store: Arc<Mutex<StoreState<R>>>, never locked across .await   │
//! │  • DepotConfig: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod context;
mod store;

pub use context::{AppContext, CatalogResource};
pub use store::ResourceStore;

#[cfg(test)]
pub(crate) use context::test_context;
