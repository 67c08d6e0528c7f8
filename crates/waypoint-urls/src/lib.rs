//! Route patterns and route tables for the waypoint client-side router.
//!
//! This crate is the leaf of the router: it knows nothing about history or
//! rendering. It provides:
//!
//! - [`RoutePattern`]: segment-based patterns with parameters (`{id}` / `:id`)
//!   and trailing wildcards (`{rest:*}` / `*rest` / `*`)
//! - [`RouteDefinition`]: the `{ path, name, view }` record loaded from configuration
//! - [`RouteTable`]: the validated, frozen, ordered table with a name index
//!
//! ## Example
//!
//! ```
//! use waypoint_urls::{RouteDefinition, RouteTable};
//!
//! let table = RouteTable::register([
//!     RouteDefinition::new("/users/{id}/", "user_detail", "UserDetail"),
//!     RouteDefinition::new("/*", "fallback", "NotFound"),
//! ])
//! .unwrap();
//!
//! let matched = table.match_path("/users/42/").unwrap();
//! assert_eq!(matched.route.view().as_str(), "UserDetail");
//! assert_eq!(matched.params.get("id"), Some("42"));
//! ```

pub mod error;
pub mod params;
pub mod pattern;
pub mod route;
pub mod table;

pub use error::{ConfigurationError, ParamError, PatternError, ReverseError};
pub use params::PathParams;
pub use pattern::{MAX_PATTERN_LENGTH, MAX_PATTERN_SEGMENTS, RoutePattern, Segment};
pub use route::{Route, RouteDefinition, RouteMatch, ViewId};
pub use table::RouteTable;
