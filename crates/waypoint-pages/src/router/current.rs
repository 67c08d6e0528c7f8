//! Resolution results and the current route.

use std::sync::Arc;

use waypoint_urls::{PathParams, Route, ViewId};

use super::location::Location;

/// A location that matched a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute {
	route: Arc<Route>,
	params: PathParams,
	location: Location,
}

impl ResolvedRoute {
	pub(crate) fn new(route: Arc<Route>, params: PathParams, location: Location) -> Self {
		Self {
			route,
			params,
			location,
		}
	}

	/// Returns the matched route.
	pub fn route(&self) -> &Arc<Route> {
		&self.route
	}

	/// Returns the matched route's name.
	pub fn name(&self) -> &str {
		self.route.name()
	}

	/// Returns the view to render.
	pub fn view(&self) -> &ViewId {
		self.route.view()
	}

	/// Returns the parameters bound by the match.
	pub fn params(&self) -> &PathParams {
		&self.params
	}

	/// Returns the location relative to the base path.
	pub fn location(&self) -> &Location {
		&self.location
	}
}

/// A location that matched no route, or lay outside the base path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotFound {
	request: String,
	location: Option<Location>,
}

impl NotFound {
	pub(crate) fn new(request: impl Into<String>, location: Option<Location>) -> Self {
		Self {
			request: request.into(),
			location,
		}
	}

	/// Returns the full location as requested.
	pub fn request(&self) -> &str {
		&self.request
	}

	/// Returns the location relative to the base path, or `None` when the
	/// request lay outside it.
	pub fn location(&self) -> Option<&Location> {
		self.location.as_ref()
	}
}

/// The outcome of resolving a location against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	/// A route matched.
	Matched(ResolvedRoute),
	/// Nothing matched.
	NotFound(NotFound),
}

impl Resolution {
	/// Returns whether a route matched.
	pub fn is_matched(&self) -> bool {
		matches!(self, Self::Matched(_))
	}

	/// Returns the matched route, if any.
	pub fn matched(&self) -> Option<&ResolvedRoute> {
		match self {
			Self::Matched(resolved) => Some(resolved),
			Self::NotFound(_) => None,
		}
	}

	/// Returns the matched route's name, if any.
	pub fn name(&self) -> Option<&str> {
		self.matched().map(ResolvedRoute::name)
	}
}

/// The route the router considers active.
///
/// `Start` holds only until the router is started; afterwards the current
/// route is always the resolution of the history's current entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CurrentRoute {
	/// The router has not been started.
	#[default]
	Start,
	/// The current location matched a route.
	Matched(ResolvedRoute),
	/// The current location matched nothing.
	NotFound(NotFound),
}

impl CurrentRoute {
	/// Returns whether the router has not resolved anything yet.
	pub fn is_start(&self) -> bool {
		matches!(self, Self::Start)
	}

	/// Returns whether the current location matched nothing.
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound(_))
	}

	/// Returns the matched route, if any.
	pub fn matched(&self) -> Option<&ResolvedRoute> {
		match self {
			Self::Matched(resolved) => Some(resolved),
			_ => None,
		}
	}

	/// Returns the matched route's name, if any.
	pub fn name(&self) -> Option<&str> {
		self.matched().map(ResolvedRoute::name)
	}

	/// Returns the view to render, if a route matched.
	pub fn view(&self) -> Option<&ViewId> {
		self.matched().map(ResolvedRoute::view)
	}

	/// Returns the bound parameters, if a route matched.
	pub fn params(&self) -> Option<&PathParams> {
		self.matched().map(ResolvedRoute::params)
	}
}

impl From<Resolution> for CurrentRoute {
	fn from(resolution: Resolution) -> Self {
		match resolution {
			Resolution::Matched(resolved) => Self::Matched(resolved),
			Resolution::NotFound(not_found) => Self::NotFound(not_found),
		}
	}
}
