//! Layered router settings
//!
//! Re-exports [`waypoint_conf`]: configuration sources merged by priority
//! into [`RouterSettings`].

pub use waypoint_conf::*;
