//! Client-side routing.
//!
//! - [`Router`]: resolution, navigation and the current route
//! - [`History`]: the host history the router drives ([`MemoryHistory`],
//!   and `BrowserHistory` on `wasm32`)
//! - [`ViewRegistry`]: renders the current route's view

mod core;
mod current;
mod error;
mod history;
mod listeners;
mod location;
mod outlet;
mod target;

pub use self::core::{RouteObserver, Router, RouterState};
pub use current::{CurrentRoute, NotFound, Resolution, ResolvedRoute};
pub use error::{HistoryError, RouterError};
#[cfg(target_arch = "wasm32")]
pub use history::BrowserHistory;
pub use history::{History, HistoryEvent, HistoryListener, MemoryHistory};
pub use listeners::ListenerId;
pub use location::{BasePath, Location};
pub use outlet::ViewRegistry;
pub use target::{NamedTarget, NavigationTarget};
