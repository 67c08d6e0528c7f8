//! Configuration sources for layered router settings
//!
//! Sources are merged in priority order: environment variables > TOML
//! configuration > defaults.

use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Prefix of environment variables read by [`EnvSource::new`].
pub const ENV_PREFIX: &str = "WAYPOINT_";

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

fn into_map(value: Value) -> Result<IndexMap<String, Value>, SourceError> {
	match value {
		Value::Object(map) => Ok(map.into_iter().collect()),
		_ => Err(SourceError::Parse("Expected table at root".to_string())),
	}
}

/// Environment variable configuration source
///
/// Keys lose the prefix and are lowercased, so `WAYPOINT_BASE_PATH` becomes
/// `base_path`. Values that look like JSON arrays or objects are parsed as
/// JSON; everything else stays a string.
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Create a source reading `WAYPOINT_*` variables
	///
	/// # Examples
	///
	/// ```
	/// use waypoint_conf::sources::{ConfigSource, EnvSource};
	///
	/// let source = EnvSource::new();
	/// assert_eq!(source.priority(), 100);
	/// ```
	pub fn new() -> Self {
		Self::with_prefix(ENV_PREFIX)
	}

	/// Create a source reading variables with a custom prefix
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	fn parse_value(&self, key: &str, value: String) -> Result<Value, SourceError> {
		let trimmed = value.trim_start();
		if trimmed.starts_with('[') || trimmed.starts_with('{') {
			return serde_json::from_str(trimmed).map_err(|e| {
				SourceError::Parse(format!("{}{}: {}", self.prefix, key.to_uppercase(), e))
			});
		}
		Ok(Value::String(value))
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		let mut config = IndexMap::new();

		for (key, value) in std::env::vars() {
			let Some(clean_key) = key.strip_prefix(self.prefix.as_str()) else {
				continue;
			};
			if clean_key.is_empty() {
				continue;
			}

			let lower_key = clean_key.to_lowercase();
			let parsed_value = self.parse_value(&lower_key, value)?;
			config.insert(lower_key, parsed_value);
		}

		Ok(config)
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// TOML file configuration source
///
/// A missing file loads as an empty table.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	/// Create a new TOML file configuration source
	///
	/// # Examples
	///
	/// ```
	/// use waypoint_conf::sources::TomlFileSource;
	/// use std::path::PathBuf;
	///
	/// let source = TomlFileSource::new(PathBuf::from("routes.toml"));
	/// ```
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			tracing::debug!("{} does not exist; skipping", self.path.display());
			return Ok(IndexMap::new());
		}

		let content = fs::read_to_string(&self.path)?;
		into_map(toml::from_str(&content)?)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// In-memory TOML configuration source, e.g. a document embedded with
/// `include_str!`
pub struct TomlStrSource {
	content: String,
}

impl TomlStrSource {
	/// Create a source from TOML text
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
		}
	}
}

impl ConfigSource for TomlStrSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		into_map(toml::from_str(&self.content)?)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		"Embedded TOML".to_string()
	}
}

/// Default values configuration source
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	/// Create a new default values configuration source
	///
	/// # Examples
	///
	/// ```
	/// use waypoint_conf::sources::DefaultSource;
	/// use serde_json::Value;
	///
	/// let source = DefaultSource::new()
	///     .with_value("base_path", Value::String("/".to_string()));
	/// ```
	pub fn new() -> Self {
		Self {
			values: IndexMap::new(),
		}
	}

	/// Add a default value for a configuration key
	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}
}

impl Default for DefaultSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}
