//! Navigation targets.

use waypoint_urls::PathParams;

/// Where a navigation should go.
///
/// String types convert into [`NavigationTarget::Path`]; use
/// [`NavigationTarget::named`] to build a target from a route name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
	/// A location relative to the base path, e.g. `/chart?sensor=3`.
	Path(String),
	/// A route name plus the values needed to build its location.
	Named(NamedTarget),
}

impl NavigationTarget {
	/// Starts a named target.
	///
	/// # Example
	///
	/// ```
	/// use waypoint_pages::NavigationTarget;
	///
	/// let target = NavigationTarget::named("user_detail")
	///     .param("id", "42")
	///     .query("tab", "posts");
	/// assert_eq!(target.name(), "user_detail");
	/// ```
	pub fn named(name: impl Into<String>) -> NamedTarget {
		NamedTarget {
			name: name.into(),
			params: PathParams::new(),
			query: Vec::new(),
		}
	}
}

impl From<&str> for NavigationTarget {
	fn from(path: &str) -> Self {
		Self::Path(path.to_string())
	}
}

impl From<String> for NavigationTarget {
	fn from(path: String) -> Self {
		Self::Path(path)
	}
}

impl From<&String> for NavigationTarget {
	fn from(path: &String) -> Self {
		Self::Path(path.clone())
	}
}

impl From<NamedTarget> for NavigationTarget {
	fn from(target: NamedTarget) -> Self {
		Self::Named(target)
	}
}

/// A navigation target identified by route name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedTarget {
	name: String,
	params: PathParams,
	query: Vec<(String, String)>,
}

impl NamedTarget {
	/// Sets a path parameter.
	pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(name, value);
		self
	}

	/// Replaces all path parameters.
	pub fn params(mut self, params: PathParams) -> Self {
		self.params = params;
		self
	}

	/// Appends a query pair.
	pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.push((key.into(), value.into()));
		self
	}

	/// Returns the route name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the path parameters.
	pub fn path_params(&self) -> &PathParams {
		&self.params
	}

	/// Returns the query pairs in insertion order.
	pub fn query_pairs(&self) -> &[(String, String)] {
		&self.query
	}
}
