//! History backends.
//!
//! The router never touches a host's history directly; it drives a
//! [`History`] implementation and listens for traversals the host reports.
//! [`MemoryHistory`] keeps the stack in process and is used for tests, native
//! tools and server-side resolution. On `wasm32` targets, `BrowserHistory`
//! drives the browser's History API.

use std::cell::RefCell;
use std::rc::Rc;

use super::error::HistoryError;
use super::listeners::{ListenerId, Listeners};

/// Reported to history listeners when the current entry changes by traversal.
///
/// Pushes and replaces made through [`History`] are not reported; only
/// back/forward movement is, whether the router or the user initiated it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
	/// The full location of the entry now current.
	pub location: String,
	/// How far the stack moved, or `0` when the host does not say.
	pub delta: isize,
}

/// Callback invoked for each [`HistoryEvent`].
pub type HistoryListener = Rc<dyn Fn(&HistoryEvent)>;

/// A linear stack of locations with a cursor, as exposed by a host.
pub trait History {
	/// Returns the full location of the current entry.
	fn location(&self) -> String;

	/// Adds an entry after the current one, discarding any forward entries.
	fn push(&self, location: &str) -> Result<(), HistoryError>;

	/// Overwrites the current entry.
	fn replace(&self, location: &str) -> Result<(), HistoryError>;

	/// Moves the cursor by `delta` entries.
	///
	/// Moving past either end of the stack is a no-op. Listeners are notified
	/// once the move has happened, which may be later than the return of
	/// this call on asynchronous hosts.
	fn go(&self, delta: isize);

	/// Moves one entry back.
	fn back(&self) {
		self.go(-1);
	}

	/// Moves one entry forward.
	fn forward(&self) {
		self.go(1);
	}

	/// Registers a traversal listener.
	fn listen(&self, listener: HistoryListener) -> ListenerId;

	/// Removes a traversal listener. Unknown ids are ignored.
	fn unlisten(&self, id: ListenerId);
}

#[derive(Debug)]
struct MemoryStack {
	entries: Vec<String>,
	index: usize,
}

/// An in-process history stack.
///
/// Traversals are synchronous: listeners run before [`History::go`] returns.
///
/// # Example
///
/// ```
/// use waypoint_pages::{History, MemoryHistory};
///
/// let history = MemoryHistory::new();
/// history.push("/chart").unwrap();
/// history.back();
///
/// assert_eq!(history.location(), "/");
/// assert_eq!(history.entries(), vec!["/", "/chart"]);
/// ```
pub struct MemoryHistory {
	stack: RefCell<MemoryStack>,
	listeners: Listeners<HistoryEvent>,
}

impl MemoryHistory {
	/// Creates a history whose only entry is `/`.
	pub fn new() -> Self {
		Self::with_initial("/")
	}

	/// Creates a history whose only entry is `location`.
	pub fn with_initial(location: impl Into<String>) -> Self {
		Self {
			stack: RefCell::new(MemoryStack {
				entries: vec![location.into()],
				index: 0,
			}),
			listeners: Listeners::new(),
		}
	}

	/// Returns all entries, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.stack.borrow().entries.clone()
	}

	/// Returns the cursor position.
	pub fn index(&self) -> usize {
		self.stack.borrow().index
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.stack.borrow().entries.len()
	}

	/// Always `false`: the stack holds at least its initial entry.
	pub fn is_empty(&self) -> bool {
		self.stack.borrow().entries.is_empty()
	}

	/// Returns the number of registered listeners.
	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let stack = self.stack.borrow();
		f.debug_struct("MemoryHistory")
			.field("entries", &stack.entries)
			.field("index", &stack.index)
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

impl History for MemoryHistory {
	fn location(&self) -> String {
		let stack = self.stack.borrow();
		stack.entries[stack.index].clone()
	}

	fn push(&self, location: &str) -> Result<(), HistoryError> {
		let mut stack = self.stack.borrow_mut();
		let keep = stack.index + 1;
		stack.entries.truncate(keep);
		stack.entries.push(location.to_string());
		stack.index = keep;
		Ok(())
	}

	fn replace(&self, location: &str) -> Result<(), HistoryError> {
		let mut stack = self.stack.borrow_mut();
		let index = stack.index;
		stack.entries[index] = location.to_string();
		Ok(())
	}

	fn go(&self, delta: isize) {
		if delta == 0 {
			return;
		}

		let event = {
			let mut stack = self.stack.borrow_mut();
			let target = stack
				.index
				.checked_add_signed(delta)
				.filter(|&target| target < stack.entries.len());

			let Some(target) = target else {
				tracing::trace!(
					delta,
					index = stack.index,
					"History traversal out of range; ignoring"
				);
				return;
			};

			stack.index = target;
			HistoryEvent {
				location: stack.entries[target].clone(),
				delta,
			}
		};

		self.listeners.notify(&event);
	}

	fn listen(&self, listener: HistoryListener) -> ListenerId {
		self.listeners.add(listener)
	}

	fn unlisten(&self, id: ListenerId) {
		self.listeners.remove(id);
	}
}

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;

#[cfg(target_arch = "wasm32")]
mod browser {
	use std::cell::RefCell;
	use std::rc::Rc;

	use wasm_bindgen::JsCast;
	use wasm_bindgen::prelude::*;

	use super::{History, HistoryEvent, HistoryListener};
	use crate::router::error::HistoryError;
	use crate::router::listeners::{ListenerId, Listeners};

	/// History backed by `window.history`.
	///
	/// A single `popstate` handler is installed while at least one listener
	/// is registered. The browser does not report traversal distance, so
	/// events carry a `delta` of `0`.
	pub struct BrowserHistory {
		window: web_sys::Window,
		listeners: Rc<Listeners<HistoryEvent>>,
		popstate: RefCell<Option<Closure<dyn FnMut(web_sys::Event)>>>,
	}

	impl BrowserHistory {
		/// Binds to the global `window`.
		pub fn new() -> Result<Self, HistoryError> {
			let window = web_sys::window()
				.ok_or_else(|| HistoryError::Unavailable("no global window".to_string()))?;
			window.history().map_err(unavailable)?;

			Ok(Self {
				window,
				listeners: Rc::new(Listeners::new()),
				popstate: RefCell::new(None),
			})
		}

		fn history(&self) -> Result<web_sys::History, HistoryError> {
			self.window.history().map_err(unavailable)
		}

		fn install_popstate(&self) {
			let listeners = Rc::clone(&self.listeners);
			let window = self.window.clone();
			let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
				let event = HistoryEvent {
					location: current_location(&window),
					delta: 0,
				};
				listeners.notify(&event);
			});

			if let Err(e) = self
				.window
				.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
			{
				tracing::error!("Failed to install popstate listener: {:?}", e);
				return;
			}

			*self.popstate.borrow_mut() = Some(closure);
		}

		fn remove_popstate(&self) {
			if let Some(closure) = self.popstate.borrow_mut().take() {
				let _ = self.window.remove_event_listener_with_callback(
					"popstate",
					closure.as_ref().unchecked_ref(),
				);
			}
		}
	}

	impl History for BrowserHistory {
		fn location(&self) -> String {
			current_location(&self.window)
		}

		fn push(&self, location: &str) -> Result<(), HistoryError> {
			self.history()?
				.push_state_with_url(&JsValue::NULL, "", Some(location))
				.map_err(rejected)
		}

		fn replace(&self, location: &str) -> Result<(), HistoryError> {
			self.history()?
				.replace_state_with_url(&JsValue::NULL, "", Some(location))
				.map_err(rejected)
		}

		fn go(&self, delta: isize) {
			if delta == 0 {
				return;
			}

			let Ok(delta) = i32::try_from(delta) else {
				tracing::warn!(delta, "History traversal distance out of range; ignoring");
				return;
			};

			match self.history() {
				Ok(history) => {
					if let Err(e) = history.go_with_delta(delta) {
						tracing::warn!("history.go({}) failed: {}", delta, rejected(e));
					}
				}
				Err(e) => tracing::warn!("{}", e),
			}
		}

		fn listen(&self, listener: HistoryListener) -> ListenerId {
			let id = self.listeners.add(listener);
			if self.popstate.borrow().is_none() {
				self.install_popstate();
			}
			id
		}

		fn unlisten(&self, id: ListenerId) {
			self.listeners.remove(id);
			if self.listeners.len() == 0 {
				self.remove_popstate();
			}
		}
	}

	impl Drop for BrowserHistory {
		fn drop(&mut self) {
			self.remove_popstate();
		}
	}

	fn current_location(window: &web_sys::Window) -> String {
		let location = window.location();
		format!(
			"{}{}{}",
			location.pathname().unwrap_or_else(|_| "/".to_string()),
			location.search().unwrap_or_default(),
			location.hash().unwrap_or_default()
		)
	}

	fn unavailable(value: JsValue) -> HistoryError {
		HistoryError::Unavailable(format!("{:?}", value))
	}

	fn rejected(value: JsValue) -> HistoryError {
		HistoryError::Rejected(format!("{:?}", value))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;
	use rstest::rstest;

	fn recording(history: &MemoryHistory) -> Rc<RefCell<Vec<HistoryEvent>>> {
		let events = Rc::new(RefCell::new(Vec::new()));
		let sink = Rc::clone(&events);
		history.listen(Rc::new(move |event: &HistoryEvent| {
			sink.borrow_mut().push(event.clone());
		}));
		events
	}

	#[rstest]
	fn test_push_and_traverse() {
		let history = MemoryHistory::new();
		let events = recording(&history);

		history.push("/chart").unwrap();
		history.push("/chart?sensor=3").unwrap();
		history.back();
		history.back();
		history.forward();

		assert_eq!(history.location(), "/chart");
		assert_eq!(history.index(), 1);
		assert_eq!(
			*events.borrow(),
			vec![
				HistoryEvent {
					location: "/chart".to_string(),
					delta: -1
				},
				HistoryEvent {
					location: "/".to_string(),
					delta: -1
				},
				HistoryEvent {
					location: "/chart".to_string(),
					delta: 1
				},
			]
		);
	}

	#[rstest]
	fn test_push_discards_forward_entries() {
		let history = MemoryHistory::new();
		history.push("/a").unwrap();
		history.push("/b").unwrap();
		history.go(-2);
		history.push("/c").unwrap();

		assert_eq!(history.entries(), vec!["/", "/c"]);
		assert_eq!(history.index(), 1);
	}

	#[rstest]
	fn test_replace_keeps_length() {
		let history = MemoryHistory::with_initial("/start");
		history.replace("/chart").unwrap();

		assert_eq!(history.entries(), vec!["/chart"]);
		assert_eq!(history.len(), 1);
	}

	#[rstest]
	#[case(-1)]
	#[case(1)]
	#[case(5)]
	#[case(0)]
	fn test_go_out_of_range_is_noop(#[case] delta: isize) {
		let history = MemoryHistory::new();
		let events = recording(&history);

		history.go(delta);

		assert_eq!(history.location(), "/");
		assert!(events.borrow().is_empty());
	}

	#[rstest]
	fn test_unlisten() {
		let history = MemoryHistory::new();
		let id = history.listen(Rc::new(|_: &HistoryEvent| {}));
		assert_eq!(history.listener_count(), 1);

		history.unlisten(id);
		assert_eq!(history.listener_count(), 0);
	}

	#[rstest]
	fn test_listener_can_read_history_during_notify() {
		let history = Rc::new(MemoryHistory::new());
		history.push("/chart").unwrap();

		let observed = Rc::new(RefCell::new(None));
		{
			let weak = Rc::downgrade(&history);
			let observed = Rc::clone(&observed);
			history.listen(Rc::new(move |_: &HistoryEvent| {
				if let Some(history) = weak.upgrade() {
					*observed.borrow_mut() = Some(history.location());
				}
			}));
		}

		history.back();

		assert_eq!(observed.borrow().as_deref(), Some("/"));
	}
}
