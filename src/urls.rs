//! Route patterns and route tables
//!
//! Re-exports [`waypoint_urls`]: pattern syntax (`{id}`, `:id`, trailing
//! wildcards), route definitions and the validated [`RouteTable`].

pub use waypoint_urls::*;
