//! The frozen route table.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ConfigurationError;
use crate::pattern::RoutePattern;
use crate::route::{Route, RouteDefinition, RouteMatch};

/// An ordered, validated, immutable collection of routes.
///
/// Registration order decides ambiguous matches: the first route whose
/// pattern matches a path wins. A name index is built once during
/// registration so lookups by name never scan the table.
#[derive(Debug)]
pub struct RouteTable {
	/// Routes in registration order.
	routes: Vec<Arc<Route>>,
	/// Route name to position in `routes`.
	name_index: HashMap<String, usize>,
}

impl RouteTable {
	/// Validates and compiles `definitions` into a table.
	///
	/// # Errors
	///
	/// Returns a [`ConfigurationError`] if `definitions` is empty, a name is
	/// empty or repeated, or a path is not a well-formed pattern.
	///
	/// # Example
	///
	/// ```
	/// use waypoint_urls::{RouteDefinition, RouteTable};
	///
	/// let table = RouteTable::register([
	///     RouteDefinition::new("/", "SensorData", "SensorData"),
	///     RouteDefinition::new("/chart", "SensorChart", "SensorChart"),
	/// ])
	/// .unwrap();
	///
	/// let matched = table.match_path("/chart").unwrap();
	/// assert_eq!(matched.route.name(), "SensorChart");
	/// ```
	pub fn register<I>(definitions: I) -> Result<Self, ConfigurationError>
	where
		I: IntoIterator<Item = RouteDefinition>,
	{
		let mut routes: Vec<Arc<Route>> = Vec::new();
		let mut name_index: HashMap<String, usize> = HashMap::new();

		for definition in definitions {
			if definition.name().is_empty() {
				return Err(ConfigurationError::EmptyName {
					pattern: definition.path().to_string(),
				});
			}

			if name_index.contains_key(definition.name()) {
				return Err(ConfigurationError::DuplicateName(
					definition.name().to_string(),
				));
			}

			let pattern = RoutePattern::parse(definition.path()).map_err(|source| {
				ConfigurationError::MalformedPattern {
					name: definition.name().to_string(),
					pattern: definition.path().to_string(),
					source,
				}
			})?;

			if let Some(earlier) = routes.iter().find(|r| r.pattern().shadows(&pattern)) {
				tracing::warn!(
					"Route '{}' ({}) is unreachable: every path it matches is claimed by earlier route '{}' ({})",
					definition.name(),
					pattern,
					earlier.name(),
					earlier.pattern()
				);
			}

			let index = routes.len();
			tracing::debug!(route = definition.name(), pattern = %pattern, index, "registered route");
			name_index.insert(definition.name().to_string(), index);
			routes.push(Arc::new(Route::new(definition, pattern, index)));
		}

		if routes.is_empty() {
			return Err(ConfigurationError::EmptyTable);
		}

		tracing::info!("Route table registered with {} routes", routes.len());
		Ok(Self { routes, name_index })
	}

	/// Returns the number of routes.
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Always `false`: a registered table has at least one route.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}

	/// Iterates routes in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<Route>> {
		self.routes.iter()
	}

	/// Looks up a route by name.
	pub fn get(&self, name: &str) -> Option<&Arc<Route>> {
		self.name_index.get(name).map(|&index| &self.routes[index])
	}

	/// Checks if a route name exists.
	pub fn contains(&self, name: &str) -> bool {
		self.name_index.contains_key(name)
	}

	/// Matches a path (without query or fragment) against the table.
	///
	/// Routes are tried in registration order and the first match wins.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		self.routes.iter().find_map(|route| {
			route.pattern().matches(path).map(|params| RouteMatch {
				route: Arc::clone(route),
				params,
			})
		})
	}
}

impl<'a> IntoIterator for &'a RouteTable {
	type Item = &'a Arc<Route>;
	type IntoIter = std::slice::Iter<'a, Arc<Route>>;

	fn into_iter(self) -> Self::IntoIter {
		self.routes.iter()
	}
}
