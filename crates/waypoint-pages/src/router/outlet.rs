//! Mapping from view identifiers to renderable values.

use std::collections::HashMap;

use waypoint_urls::{RouteTable, ViewId};

use super::current::{CurrentRoute, NotFound, ResolvedRoute};

type ViewFactory<V> = Box<dyn Fn(&ResolvedRoute) -> V>;
type NotFoundFactory<V> = Box<dyn Fn(&NotFound) -> V>;

/// Turns the current route into a value of the host's choosing.
///
/// The registry never inspects `V`; it only picks the factory registered for
/// the current route's view and calls it.
///
/// # Example
///
/// ```
/// use waypoint_pages::{CurrentRoute, ViewRegistry};
///
/// let views = ViewRegistry::new()
///     .view("SensorData", |_| "table".to_string())
///     .not_found(|missing| format!("404: {}", missing.request()));
///
/// assert_eq!(views.render(&CurrentRoute::Start), None);
/// ```
pub struct ViewRegistry<V> {
	factories: HashMap<ViewId, ViewFactory<V>>,
	not_found: Option<NotFoundFactory<V>>,
}

impl<V> ViewRegistry<V> {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self {
			factories: HashMap::new(),
			not_found: None,
		}
	}

	/// Registers the factory for `view`, replacing any previous one.
	pub fn view<F>(mut self, view: impl Into<ViewId>, factory: F) -> Self
	where
		F: Fn(&ResolvedRoute) -> V + 'static,
	{
		self.factories.insert(view.into(), Box::new(factory));
		self
	}

	/// Registers the factory used for unmatched locations.
	pub fn not_found<F>(mut self, factory: F) -> Self
	where
		F: Fn(&NotFound) -> V + 'static,
	{
		self.not_found = Some(Box::new(factory));
		self
	}

	/// Checks if a factory is registered for `view`.
	pub fn contains(&self, view: &str) -> bool {
		self.factories.contains_key(view)
	}

	/// Returns the views referenced by `table` that have no factory.
	pub fn missing_views<'a>(&self, table: &'a RouteTable) -> Vec<&'a ViewId> {
		table
			.iter()
			.map(|route| route.view())
			.filter(|view| !self.contains(view.as_str()))
			.collect()
	}

	/// Renders `current`.
	///
	/// Returns `None` before the router has started, for a matched view with
	/// no factory, and for an unmatched location without a not-found factory.
	pub fn render(&self, current: &CurrentRoute) -> Option<V> {
		match current {
			CurrentRoute::Start => None,
			CurrentRoute::Matched(resolved) => match self.factories.get(resolved.view().as_str()) {
				Some(factory) => Some(factory(resolved)),
				None => {
					tracing::warn!("No view registered for '{}'", resolved.view());
					None
				}
			},
			CurrentRoute::NotFound(not_found) => self.not_found.as_ref().map(|factory| factory(not_found)),
		}
	}
}

impl<V> Default for ViewRegistry<V> {
	fn default() -> Self {
		Self::new()
	}
}

impl<V> std::fmt::Debug for ViewRegistry<V> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ViewRegistry")
			.field("views", &self.factories.keys().collect::<Vec<_>>())
			.field("has_not_found", &self.not_found.is_some())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::router::{MemoryHistory, Router};
	use rstest::rstest;
	use std::rc::Rc;
	use waypoint_urls::RouteDefinition;

	fn router() -> Router {
		let table = RouteTable::register([
			RouteDefinition::new("/", "SensorData", "SensorData"),
			RouteDefinition::new("/chart", "SensorChart", "SensorChart"),
		])
		.unwrap();
		Router::new(table, Rc::new(MemoryHistory::new()))
	}

	fn views() -> ViewRegistry<String> {
		ViewRegistry::new()
			.view("SensorData", |route: &ResolvedRoute| format!("data@{}", route.location()))
			.not_found(|missing: &NotFound| format!("missing {}", missing.request()))
	}

	#[rstest]
	fn test_render_matched() {
		let router = router();
		let current = router.start();

		assert_eq!(views().render(&current).as_deref(), Some("data@/"));
	}

	#[rstest]
	fn test_render_not_found() {
		let router = router();
		router.navigate("/settings").unwrap();

		assert_eq!(
			views().render(&router.current_route()).as_deref(),
			Some("missing /settings")
		);
	}

	#[rstest]
	fn test_render_unregistered_view_is_none() {
		let router = router();
		router.navigate("/chart").unwrap();

		assert_eq!(views().render(&router.current_route()), None);
	}

	#[rstest]
	fn test_missing_views() {
		let router = router();
		let missing = views().missing_views(router.table());

		assert_eq!(missing, vec![&ViewId::from("SensorChart")]);
	}
}
