//! Locations and the base path prefix.

use std::fmt;

/// A parsed navigation request: path plus optional query and fragment.
///
/// Parsing never fails. An empty path becomes `/` and a missing leading `/`
/// is added; empty `?` or `#` components are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
	path: String,
	query: Option<String>,
	fragment: Option<String>,
}

impl Location {
	/// Parses a location string such as `/chart?sensor=3#latest`.
	///
	/// # Example
	///
	/// ```
	/// use waypoint_pages::Location;
	///
	/// let location = Location::parse("/chart?sensor=3#latest");
	/// assert_eq!(location.path(), "/chart");
	/// assert_eq!(location.query(), Some("sensor=3"));
	/// assert_eq!(location.fragment(), Some("latest"));
	/// ```
	pub fn parse(raw: &str) -> Self {
		let (rest, fragment) = match raw.split_once('#') {
			Some((rest, fragment)) => (rest, non_empty(fragment)),
			None => (raw, None),
		};

		let (path, query) = match rest.split_once('?') {
			Some((path, query)) => (path, non_empty(query)),
			None => (rest, None),
		};

		let path = if path.starts_with('/') {
			path.to_string()
		} else {
			format!("/{}", path)
		};

		Self {
			path,
			query,
			fragment,
		}
	}

	/// Returns the path component.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the raw query component, without `?`.
	pub fn query(&self) -> Option<&str> {
		self.query.as_deref()
	}

	/// Returns the fragment, without `#`.
	pub fn fragment(&self) -> Option<&str> {
		self.fragment.as_deref()
	}

	/// Decodes the query component into `(key, value)` pairs.
	///
	/// A query that is not valid `application/x-www-form-urlencoded` yields
	/// no pairs.
	pub fn query_pairs(&self) -> Vec<(String, String)> {
		let Some(query) = self.query.as_deref() else {
			return Vec::new();
		};

		serde_urlencoded::from_str(query).unwrap_or_else(|e| {
			tracing::debug!("Ignoring undecodable query '{}': {}", query, e);
			Vec::new()
		})
	}

	/// Returns the first value for `key` in the query.
	pub fn query_value(&self, key: &str) -> Option<String> {
		self.query_pairs()
			.into_iter()
			.find_map(|(k, v)| (k == key).then_some(v))
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.path)?;
		if let Some(query) = &self.query {
			write!(f, "?{}", query)?;
		}
		if let Some(fragment) = &self.fragment {
			write!(f, "#{}", fragment)?;
		}
		Ok(())
	}
}

fn non_empty(component: &str) -> Option<String> {
	(!component.is_empty()).then(|| component.to_string())
}

/// The prefix under which the application is served, e.g. `/dashboard`.
///
/// Normalized to a leading `/` and no trailing `/`; the root base (`/` or an
/// empty string) is stored as no prefix at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BasePath(String);

impl BasePath {
	/// Normalizes `raw` into a base path.
	///
	/// # Example
	///
	/// ```
	/// use waypoint_pages::BasePath;
	///
	/// assert_eq!(BasePath::new("dashboard/").as_str(), "/dashboard");
	/// assert!(BasePath::new("/").is_root());
	/// ```
	pub fn new(raw: &str) -> Self {
		let trimmed = raw.trim().trim_end_matches('/');
		if trimmed.is_empty() {
			Self(String::new())
		} else if trimmed.starts_with('/') {
			Self(trimmed.to_string())
		} else {
			Self(format!("/{}", trimmed))
		}
	}

	/// The root base path (no prefix).
	pub fn root() -> Self {
		Self::default()
	}

	/// Returns whether this is the root base path.
	pub fn is_root(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the prefix; empty for the root base path.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Strips the prefix from a full location.
	///
	/// Returns `None` when `location` lies outside the base path. The prefix
	/// must end at a component boundary: base `/app` strips `/app/x` and
	/// `/app?q`, but not `/application`.
	pub fn strip<'a>(&self, location: &'a str) -> Option<&'a str> {
		if self.is_root() {
			return Some(location);
		}

		let rest = location.strip_prefix(self.0.as_str())?;
		(rest.is_empty() || rest.starts_with(['/', '?', '#'])).then_some(rest)
	}

	/// Prefixes an application-relative location (starting with `/`).
	pub fn join(&self, location: &str) -> String {
		format!("{}{}", self.0, location)
	}
}

impl fmt::Display for BasePath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.is_root() {
			f.write_str("/")
		} else {
			f.write_str(&self.0)
		}
	}
}

impl From<&str> for BasePath {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}
