//! # Waypoint
//!
//! A client-side view router: maps location strings to named views, binds
//! path parameters, and keeps the active view in step with a navigation
//! history.
//!
//! ## Crates
//!
//! - [`urls`]: route patterns and the frozen, ordered route table
//! - [`pages`]: the router, history backends and view rendering
//! - [`conf`]: layered settings (defaults, TOML, `WAYPOINT_*` environment)
//!
//! ## Feature Flags
//!
//! - `conf` (default) - layered settings via `waypoint-conf`
//!
//! ## Quick Example
//!
//! ```
//! use std::rc::Rc;
//! use waypoint::prelude::*;
//!
//! let table = RouteTable::register([
//!     RouteDefinition::new("/", "SensorData", "SensorData"),
//!     RouteDefinition::new("/chart", "SensorChart", "SensorChart"),
//! ])
//! .unwrap();
//!
//! let router = Router::new(table, Rc::new(MemoryHistory::new()));
//! router.start();
//!
//! router.navigate(NavigationTarget::named("SensorChart")).unwrap();
//! assert_eq!(router.current_route().name(), Some("SensorChart"));
//!
//! router.navigate("/nowhere").unwrap();
//! assert!(router.current_route().is_not_found());
//!
//! router.back();
//! assert_eq!(router.current_route().name(), Some("SensorChart"));
//! ```

#[cfg(feature = "conf")]
pub mod conf;
pub mod pages;
pub mod urls;

pub use waypoint_pages::{
	BasePath, CurrentRoute, History, HistoryError, MemoryHistory, NavigationTarget, Resolution,
	Router, RouterError, RouterState, ViewRegistry,
};
pub use waypoint_urls::{ConfigurationError, PathParams, RouteDefinition, RouteTable, ViewId};

#[cfg(feature = "conf")]
pub use waypoint_conf::{RouterSettings, SettingsBuilder, SettingsError};

/// Commonly used types
pub mod prelude {
	pub use crate::{
		BasePath, ConfigurationError, CurrentRoute, History, MemoryHistory, NavigationTarget,
		PathParams, Resolution, RouteDefinition, RouteTable, Router, RouterError, RouterState,
		ViewId, ViewRegistry,
	};

	#[cfg(feature = "conf")]
	pub use crate::{RouterSettings, SettingsBuilder};
}
