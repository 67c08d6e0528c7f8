//! Client-side routing
//!
//! Re-exports [`waypoint_pages`]: the [`Router`], the [`History`] trait with
//! its in-memory and browser implementations, current-route types and the
//! [`ViewRegistry`].
//!
//! ## Architecture
//!
//! - **Resolution**: base path stripping, then first match in registration order
//! - **Navigation**: by path or by route name, pushed or replaced on history
//! - **Synchronization**: history traversals re-resolve the current route
//! - **Rendering**: view identifiers map to host-provided factories

pub use waypoint_pages::*;
