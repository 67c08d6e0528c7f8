//! Route definitions and compiled routes.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::params::PathParams;
use crate::pattern::RoutePattern;

/// Opaque identifier of a renderable unit.
///
/// The router never looks inside a view; it only hands this identifier to
/// whatever renders the current route.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
	/// Creates a view identifier.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Returns the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ViewId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for ViewId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

impl From<String> for ViewId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

impl AsRef<str> for ViewId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for ViewId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

/// A route as written in configuration: `{ path, name, view }`.
///
/// Definitions are plain data. They are validated and compiled by
/// [`RouteTable::register`](crate::RouteTable::register).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteDefinition {
	path: String,
	name: String,
	view: ViewId,
}

impl RouteDefinition {
	/// Creates a definition.
	///
	/// # Example
	///
	/// ```
	/// use waypoint_urls::RouteDefinition;
	///
	/// let chart = RouteDefinition::new("/chart", "SensorChart", "SensorChart");
	/// assert_eq!(chart.name(), "SensorChart");
	/// ```
	pub fn new(path: impl Into<String>, name: impl Into<String>, view: impl Into<ViewId>) -> Self {
		Self {
			path: path.into(),
			name: name.into(),
			view: view.into(),
		}
	}

	/// Returns the raw pattern string.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the view identifier.
	pub fn view(&self) -> &ViewId {
		&self.view
	}
}

/// A registered route: its definition plus the compiled pattern.
#[derive(Debug)]
pub struct Route {
	definition: RouteDefinition,
	pattern: RoutePattern,
	/// Position in registration order.
	index: usize,
}

impl Route {
	pub(crate) fn new(definition: RouteDefinition, pattern: RoutePattern, index: usize) -> Self {
		Self {
			definition,
			pattern,
			index,
		}
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		self.definition.name()
	}

	/// Returns the view identifier.
	pub fn view(&self) -> &ViewId {
		self.definition.view()
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	/// Returns the definition this route was registered from.
	pub fn definition(&self) -> &RouteDefinition {
		&self.definition
	}

	/// Returns the route's position in registration order.
	pub fn index(&self) -> usize {
		self.index
	}
}

impl PartialEq for Route {
	fn eq(&self, other: &Self) -> bool {
		self.index == other.index && self.definition == other.definition
	}
}

impl Eq for Route {}

/// A route matched against a path, with its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
	/// The matched route.
	pub route: Arc<Route>,
	/// Parameters bound by the match.
	pub params: PathParams,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_definition_deserializes_from_json() {
		let json = r#"{"path": "/chart", "name": "SensorChart", "view": "SensorChart"}"#;

		let definition: RouteDefinition = serde_json::from_str(json).unwrap();

		assert_eq!(
			definition,
			RouteDefinition::new("/chart", "SensorChart", "SensorChart")
		);
	}

	#[rstest]
	fn test_view_id_display_and_borrow() {
		let view = ViewId::from("SensorData");
		let as_borrowed: &str = view.borrow();

		assert_eq!(view.to_string(), "SensorData");
		assert_eq!(as_borrowed, "SensorData");
	}
}
