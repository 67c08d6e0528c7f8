//! Core Router Implementation.
//!
//! The [`Router`] owns the current route and keeps it in step with a
//! [`History`]: every navigation it performs and every traversal the history
//! reports ends in one resolution against the route table.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use waypoint_urls::{ReverseError, RouteTable};

use super::current::{CurrentRoute, NotFound, Resolution, ResolvedRoute};
use super::error::RouterError;
use super::history::{History, HistoryEvent};
use super::listeners::{ListenerId, Listeners};
use super::location::{BasePath, Location};
use super::target::NavigationTarget;

/// Lifecycle of a [`Router`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
	/// Constructed; the current route is [`CurrentRoute::Start`].
	Uninitialized,
	/// Subscribed to history; the current route tracks the current entry.
	Active,
}

/// How a navigation updates the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigationType {
	Push,
	Replace,
}

/// Callback invoked with each committed [`CurrentRoute`].
pub type RouteObserver = Rc<dyn Fn(&CurrentRoute)>;

struct RouterInner {
	table: Arc<RouteTable>,
	history: Rc<dyn History>,
	base: BasePath,
	state: Cell<RouterState>,
	current: RefCell<CurrentRoute>,
	observers: Listeners<CurrentRoute>,
	history_listener: Cell<Option<ListenerId>>,
	generation: Cell<u64>,
}

impl RouterInner {
	fn resolve(&self, request: &str) -> Resolution {
		let Some(relative) = self.base.strip(request) else {
			tracing::debug!("'{}' is outside base path '{}'", request, self.base);
			return Resolution::NotFound(NotFound::new(request, None));
		};

		let location = Location::parse(relative);
		match self.table.match_path(location.path()) {
			Some(matched) => {
				Resolution::Matched(ResolvedRoute::new(matched.route, matched.params, location))
			}
			None => Resolution::NotFound(NotFound::new(request, Some(location))),
		}
	}

	/// Resolves `request` and makes the result the current route.
	fn commit(&self, request: &str) -> CurrentRoute {
		let resolution = self.resolve(request);
		match &resolution {
			Resolution::Matched(resolved) => tracing::debug!(
				route = resolved.name(),
				view = %resolved.view(),
				"Resolved '{}'",
				request
			),
			Resolution::NotFound(_) => tracing::warn!("No route matches '{}'", request),
		}

		let current = CurrentRoute::from(resolution);
		*self.current.borrow_mut() = current.clone();

		// A commit made by an observer supersedes this one; observers not yet
		// reached only get the newer route.
		let generation = self.generation.get() + 1;
		self.generation.set(generation);
		self.observers.notify_while(&current, || self.generation.get() == generation);
		current
	}

	fn on_history_event(&self, event: &HistoryEvent) {
		tracing::debug!(delta = event.delta, "History moved to '{}'", event.location);
		self.commit(&event.location);
	}
}

impl Drop for RouterInner {
	fn drop(&mut self) {
		if let Some(id) = self.history_listener.take() {
			self.history.unlisten(id);
		}
	}
}

/// The client-side router.
///
/// `Router` is a cheap handle: clones share the same current route, history
/// and observers. It is single-threaded; the route table it reads is frozen
/// and may be shared across threads.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use waypoint_pages::{MemoryHistory, Router};
/// use waypoint_urls::{RouteDefinition, RouteTable};
///
/// let table = RouteTable::register([
///     RouteDefinition::new("/", "SensorData", "SensorData"),
///     RouteDefinition::new("/chart", "SensorChart", "SensorChart"),
/// ])
/// .unwrap();
///
/// let router = Router::new(table, Rc::new(MemoryHistory::new()));
/// router.start();
/// router.navigate("/chart").unwrap();
/// assert_eq!(router.current_route().name(), Some("SensorChart"));
///
/// router.back();
/// assert_eq!(router.current_route().name(), Some("SensorData"));
/// ```
#[derive(Clone)]
pub struct Router {
	inner: Rc<RouterInner>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes_count", &self.inner.table.len())
			.field("base_path", &self.inner.base)
			.field("state", &self.inner.state.get())
			.field("current", &self.inner.current.borrow().name())
			.finish()
	}
}

impl Router {
	/// Creates a router serving from the root base path.
	pub fn new(table: impl Into<Arc<RouteTable>>, history: Rc<dyn History>) -> Self {
		Self::with_base_path(table, history, BasePath::root())
	}

	/// Creates a router serving under `base`.
	pub fn with_base_path(
		table: impl Into<Arc<RouteTable>>,
		history: Rc<dyn History>,
		base: BasePath,
	) -> Self {
		Self {
			inner: Rc::new(RouterInner {
				table: table.into(),
				history,
				base,
				state: Cell::new(RouterState::Uninitialized),
				current: RefCell::new(CurrentRoute::Start),
				observers: Listeners::new(),
				history_listener: Cell::new(None),
				generation: Cell::new(0),
			}),
		}
	}

	/// Returns the route table.
	pub fn table(&self) -> &Arc<RouteTable> {
		&self.inner.table
	}

	/// Returns the base path.
	pub fn base_path(&self) -> &BasePath {
		&self.inner.base
	}

	/// Returns the lifecycle state.
	pub fn state(&self) -> RouterState {
		self.inner.state.get()
	}

	/// Activates the router: subscribes to history and resolves the
	/// history's current location.
	///
	/// Calling `start` on an active router returns the current route and
	/// does nothing else.
	pub fn start(&self) -> CurrentRoute {
		if self.state() == RouterState::Active {
			return self.current_route();
		}

		let weak = Rc::downgrade(&self.inner);
		let id = self.inner.history.listen(Rc::new(move |event: &HistoryEvent| {
			if let Some(inner) = weak.upgrade() {
				inner.on_history_event(event);
			}
		}));
		self.inner.history_listener.set(Some(id));
		self.inner.state.set(RouterState::Active);

		let location = self.inner.history.location();
		tracing::info!("Router activated at '{}'", location);
		self.inner.commit(&location)
	}

	fn ensure_started(&self) {
		if self.state() == RouterState::Uninitialized {
			self.start();
		}
	}

	/// Resolves a full location without changing any state.
	///
	/// A location outside the base path or matching no route resolves to
	/// [`Resolution::NotFound`].
	pub fn resolve(&self, request: &str) -> Resolution {
		self.inner.resolve(request)
	}

	/// Returns the location `target` would navigate to, base path included.
	///
	/// # Errors
	///
	/// Returns [`RouterError::UnknownRoute`] or
	/// [`RouterError::MissingParameter`] for named targets that cannot be
	/// built.
	pub fn href(&self, target: impl Into<NavigationTarget>) -> Result<String, RouterError> {
		self.location_for(&target.into())
	}

	/// Generates a location by route name with parameters.
	pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouterError> {
		let target = params
			.iter()
			.fold(NavigationTarget::named(name), |target, (key, value)| {
				target.param(*key, *value)
			});
		self.href(target)
	}

	fn location_for(&self, target: &NavigationTarget) -> Result<String, RouterError> {
		let relative = match target {
			NavigationTarget::Path(path) if path.starts_with('/') => path.clone(),
			NavigationTarget::Path(path) => format!("/{}", path),
			NavigationTarget::Named(named) => {
				let route = self
					.inner
					.table
					.get(named.name())
					.ok_or_else(|| RouterError::UnknownRoute(named.name().to_string()))?;

				let mut location = route
					.pattern()
					.reverse(named.path_params())
					.map_err(|err| match err {
						ReverseError::MissingParameter(parameter) => RouterError::MissingParameter {
							route: named.name().to_string(),
							parameter,
						},
					})?;

				if !named.query_pairs().is_empty() {
					let query = serde_urlencoded::to_string(named.query_pairs())
						.map_err(|err| RouterError::InvalidQuery(err.to_string()))?;
					location.push('?');
					location.push_str(&query);
				}
				location
			}
		};

		Ok(self.inner.base.join(&relative))
	}

	/// Navigates to `target`, pushing a history entry.
	///
	/// Navigating to the location that is already current re-resolves it
	/// without pushing a duplicate entry.
	///
	/// # Errors
	///
	/// Fails before touching history or the current route when a named
	/// target cannot be built, or when the history rejects the update.
	pub fn navigate(&self, target: impl Into<NavigationTarget>) -> Result<(), RouterError> {
		self.transition(target.into(), NavigationType::Push)
	}

	/// Navigates to `target`, replacing the current history entry.
	pub fn replace(&self, target: impl Into<NavigationTarget>) -> Result<(), RouterError> {
		self.transition(target.into(), NavigationType::Replace)
	}

	fn transition(&self, target: NavigationTarget, nav_type: NavigationType) -> Result<(), RouterError> {
		let location = self.location_for(&target)?;

		let history = &self.inner.history;
		match nav_type {
			NavigationType::Push if history.location() == location => {
				tracing::debug!("Already at '{}'; not pushing a duplicate entry", location);
			}
			NavigationType::Push => history.push(&location).inspect_err(|e| {
				tracing::warn!("Failed to push '{}': {}", location, e);
			})?,
			NavigationType::Replace => history.replace(&location).inspect_err(|e| {
				tracing::warn!("Failed to replace with '{}': {}", location, e);
			})?,
		}

		// An inactive router picks the new entry up as its initial location.
		if self.state() == RouterState::Uninitialized {
			self.start();
		} else {
			self.inner.commit(&location);
		}
		Ok(())
	}

	/// Moves one history entry back.
	pub fn back(&self) {
		self.go(-1);
	}

	/// Moves one history entry forward.
	pub fn forward(&self) {
		self.go(1);
	}

	/// Moves `delta` history entries; past either end nothing happens.
	///
	/// The current route changes when the history reports the move.
	pub fn go(&self, delta: isize) {
		self.ensure_started();
		tracing::debug!(delta, "History traversal requested");
		self.inner.history.go(delta);
	}

	/// Returns a snapshot of the current route.
	pub fn current_route(&self) -> CurrentRoute {
		self.inner.current.borrow().clone()
	}

	/// Registers an observer called with every committed current route.
	pub fn subscribe<F>(&self, observer: F) -> ListenerId
	where
		F: Fn(&CurrentRoute) + 'static,
	{
		let observer: RouteObserver = Rc::new(observer);
		self.inner.observers.add(observer)
	}

	/// Removes an observer; returns whether it was registered.
	pub fn unsubscribe(&self, id: ListenerId) -> bool {
		self.inner.observers.remove(id)
	}

	/// Returns the number of registered routes.
	pub fn route_count(&self) -> usize {
		self.inner.table.len()
	}

	/// Checks if a route name exists.
	pub fn has_route(&self, name: &str) -> bool {
		self.inner.table.contains(name)
	}
}
