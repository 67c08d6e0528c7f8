//! Client-side router for waypoint.
//!
//! Resolves locations against a frozen [`RouteTable`](waypoint_urls::RouteTable),
//! keeps the current route in step with a [`History`], and renders it through
//! a [`ViewRegistry`].
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use waypoint_pages::{History, MemoryHistory, NavigationTarget, Router, ViewRegistry};
//! use waypoint_urls::{RouteDefinition, RouteTable};
//!
//! let table = RouteTable::register([
//!     RouteDefinition::new("/", "SensorData", "SensorData"),
//!     RouteDefinition::new("/chart", "SensorChart", "SensorChart"),
//! ])
//! .unwrap();
//!
//! let history = Rc::new(MemoryHistory::new());
//! let router = Router::with_base_path(table, history.clone(), "/dashboard".into());
//! let views = ViewRegistry::new()
//!     .view("SensorData", |_| "sensor table")
//!     .view("SensorChart", |_| "sensor chart");
//!
//! router.navigate(NavigationTarget::named("SensorChart")).unwrap();
//!
//! assert_eq!(history.location(), "/dashboard/chart");
//! assert_eq!(views.render(&router.current_route()), Some("sensor chart"));
//! ```

pub mod router;

pub use router::*;
