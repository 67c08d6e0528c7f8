//! Router settings and the layered builder that produces them.

use std::path::PathBuf;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use waypoint_pages::{BasePath, History, Router};
use waypoint_urls::{ConfigurationError, RouteDefinition, RouteTable};

use crate::sources::{ConfigSource, DefaultSource, EnvSource, SourceError, TomlFileSource, TomlStrSource};

/// Errors raised while assembling router settings.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	/// A source failed to load.
	#[error("{description}: {error}")]
	Source {
		/// Which source failed.
		description: String,
		#[source]
		error: SourceError,
	},

	/// The merged values do not form valid settings.
	#[error("Invalid settings: {0}")]
	Deserialize(#[from] serde_json::Error),

	/// The route definitions do not form a valid table.
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),
}

fn default_base_path() -> String {
	"/".to_string()
}

/// Everything needed to construct a [`Router`]: the base path and the
/// ordered route definitions.
///
/// # Examples
///
/// ```
/// use waypoint_conf::RouterSettings;
///
/// let settings = RouterSettings::from_toml_str(r#"
/// base_path = "/dashboard/"
///
/// [[routes]]
/// path = "/"
/// name = "SensorData"
/// view = "SensorData"
/// "#).unwrap();
///
/// assert_eq!(settings.base_path().as_str(), "/dashboard");
/// assert_eq!(settings.route_table().unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterSettings {
	/// Prefix under which the application is served.
	#[serde(default = "default_base_path")]
	pub base_path: String,
	/// Route definitions in registration order.
	#[serde(default)]
	pub routes: Vec<RouteDefinition>,
}

impl Default for RouterSettings {
	fn default() -> Self {
		Self {
			base_path: default_base_path(),
			routes: Vec::new(),
		}
	}
}

impl RouterSettings {
	/// Starts a layered builder.
	pub fn builder() -> SettingsBuilder {
		SettingsBuilder::new()
	}

	/// Parses settings from a single TOML document.
	pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
		SettingsBuilder::new()
			.add_source(TomlStrSource::new(content))
			.build()
	}

	/// Returns the normalized base path.
	pub fn base_path(&self) -> BasePath {
		BasePath::new(&self.base_path)
	}

	/// Validates the route definitions into a table.
	pub fn route_table(&self) -> Result<RouteTable, SettingsError> {
		Ok(RouteTable::register(self.routes.iter().cloned())?)
	}

	/// Builds a router over `history`.
	pub fn into_router(self, history: Rc<dyn History>) -> Result<Router, SettingsError> {
		let table = self.route_table()?;
		Ok(Router::with_base_path(table, history, self.base_path()))
	}
}

/// Merges configuration sources by priority into [`RouterSettings`].
///
/// Sources with higher priority override keys from lower ones; sources of
/// equal priority apply in the order they were added.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Creates a builder with no sources.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a source.
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// The usual stack: defaults, then `path` if it exists, then `WAYPOINT_*`
	/// environment variables.
	///
	/// # Examples
	///
	/// ```no_run
	/// use waypoint_conf::SettingsBuilder;
	///
	/// let settings = SettingsBuilder::standard("routes.toml").build().unwrap();
	/// ```
	pub fn standard(path: impl Into<PathBuf>) -> Self {
		Self::new()
			.add_source(DefaultSource::new().with_value("base_path", Value::String(default_base_path())))
			.add_source(TomlFileSource::new(path))
			.add_source(EnvSource::new())
	}

	/// Loads and merges every source.
	pub fn merge(&self) -> Result<IndexMap<String, Value>, SettingsError> {
		let mut ordered: Vec<&dyn ConfigSource> = self.sources.iter().map(|s| s.as_ref()).collect();
		ordered.sort_by_key(|source| source.priority());

		let mut merged = IndexMap::new();
		for source in ordered {
			let values = source.load().map_err(|error| SettingsError::Source {
				description: source.description(),
				error,
			})?;
			tracing::debug!(
				source = %source.description(),
				priority = source.priority(),
				keys = values.len(),
				"Loaded configuration source"
			);
			merged.extend(values);
		}

		Ok(merged)
	}

	/// Loads, merges and deserializes every source.
	pub fn build(&self) -> Result<RouterSettings, SettingsError> {
		let merged = self.merge()?;
		let settings: RouterSettings = serde_json::from_value(Value::Object(merged.into_iter().collect()))?;
		tracing::info!(
			base_path = %settings.base_path,
			routes = settings.routes.len(),
			"Router settings loaded"
		);
		Ok(settings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use waypoint_pages::MemoryHistory;

	const SENSOR_ROUTES: &str = r#"
[[routes]]
path = "/"
name = "SensorData"
view = "SensorData"

[[routes]]
path = "/chart"
name = "SensorChart"
view = "SensorChart"
"#;

	#[rstest]
	fn test_defaults_when_keys_absent() {
		let settings = RouterSettings::from_toml_str("").unwrap();

		assert_eq!(settings, RouterSettings::default());
		assert!(settings.base_path().is_root());
	}

	#[rstest]
	fn test_higher_priority_overrides() {
		let settings = SettingsBuilder::new()
			.add_source(TomlStrSource::new(r#"base_path = "/from-toml""#))
			.add_source(DefaultSource::new().with_value("base_path", Value::String("/from-defaults".to_string())))
			.build()
			.unwrap();

		assert_eq!(settings.base_path, "/from-toml");
	}

	#[rstest]
	fn test_route_order_is_preserved() {
		let settings = RouterSettings::from_toml_str(SENSOR_ROUTES).unwrap();

		let table = settings.route_table().unwrap();

		let names: Vec<&str> = table.iter().map(|r| r.name()).collect();
		assert_eq!(names, vec!["SensorData", "SensorChart"]);
	}

	#[rstest]
	fn test_duplicate_names_surface_as_configuration_error() {
		let settings = RouterSettings::from_toml_str(
			r#"
[[routes]]
path = "/"
name = "Home"
view = "SensorData"

[[routes]]
path = "/chart"
name = "Home"
view = "SensorChart"
"#,
		)
		.unwrap();

		assert!(matches!(
			settings.route_table(),
			Err(SettingsError::Configuration(ConfigurationError::DuplicateName(_)))
		));
	}

	#[rstest]
	fn test_empty_routes_surface_as_configuration_error() {
		let settings = RouterSettings::default();

		assert!(matches!(
			settings.route_table(),
			Err(SettingsError::Configuration(ConfigurationError::EmptyTable))
		));
	}

	#[rstest]
	fn test_wrong_shape_is_deserialize_error() {
		let result = RouterSettings::from_toml_str(r#"routes = "not a list""#);

		assert!(matches!(result, Err(SettingsError::Deserialize(_))));
	}

	#[rstest]
	fn test_source_error_names_the_source() {
		let err = RouterSettings::from_toml_str("routes = [").unwrap_err();

		assert!(err.to_string().starts_with("Embedded TOML: TOML error"));
	}

	#[rstest]
	fn test_into_router() {
		let mut settings = RouterSettings::from_toml_str(SENSOR_ROUTES).unwrap();
		settings.base_path = "/dashboard/".to_string();

		let router = settings
			.into_router(Rc::new(MemoryHistory::with_initial("/dashboard/chart")))
			.unwrap();

		assert_eq!(router.base_path().as_str(), "/dashboard");
		assert_eq!(router.start().name(), Some("SensorChart"));
	}
}
