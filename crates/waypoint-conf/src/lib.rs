//! Layered settings for the waypoint router.
//!
//! Router construction needs two values: the base path the application is
//! served under and the ordered route definitions. Both are read from
//! layered sources, lowest priority first:
//!
//! 1. [`DefaultSource`](sources::DefaultSource) (priority 0)
//! 2. [`TomlFileSource`](sources::TomlFileSource) / [`TomlStrSource`](sources::TomlStrSource) (50)
//! 3. [`EnvSource`](sources::EnvSource) (100), reading `WAYPOINT_*` variables
//!    such as `WAYPOINT_BASE_PATH`
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use waypoint_conf::{RouterSettings, SettingsBuilder};
//! use waypoint_conf::sources::TomlStrSource;
//! use waypoint_pages::MemoryHistory;
//!
//! let settings = SettingsBuilder::new()
//!     .add_source(TomlStrSource::new(r#"
//!         [[routes]]
//!         path = "/"
//!         name = "SensorData"
//!         view = "SensorData"
//!     "#))
//!     .build()
//!     .unwrap();
//!
//! let router = settings.into_router(Rc::new(MemoryHistory::new())).unwrap();
//! assert_eq!(router.start().name(), Some("SensorData"));
//! ```

pub mod settings;
pub mod sources;

pub use settings::{RouterSettings, SettingsBuilder, SettingsError};
pub use sources::{ConfigSource, ENV_PREFIX, SourceError};
