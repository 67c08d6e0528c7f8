//! Callback registries shared by histories and the router.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Handle returned when registering a listener; used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// An ordered set of callbacks receiving `&E`.
///
/// Notification iterates over a snapshot, so callbacks may add or remove
/// listeners (or trigger further notifications) while being called.
pub(crate) struct Listeners<E: ?Sized> {
	next_id: Cell<u64>,
	entries: RefCell<Vec<(ListenerId, Rc<dyn Fn(&E)>)>>,
}

impl<E: ?Sized> Listeners<E> {
	pub(crate) fn new() -> Self {
		Self {
			next_id: Cell::new(0),
			entries: RefCell::new(Vec::new()),
		}
	}

	pub(crate) fn add(&self, listener: Rc<dyn Fn(&E)>) -> ListenerId {
		let id = ListenerId(self.next_id.get());
		self.next_id.set(id.0 + 1);
		self.entries.borrow_mut().push((id, listener));
		id
	}

	pub(crate) fn remove(&self, id: ListenerId) -> bool {
		let mut entries = self.entries.borrow_mut();
		let before = entries.len();
		entries.retain(|(entry, _)| *entry != id);
		entries.len() != before
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.borrow().len()
	}

	pub(crate) fn notify(&self, event: &E) {
		self.notify_while(event, || true);
	}

	/// Like [`notify`](Self::notify), but stops before the next listener once
	/// `proceed` returns false.
	pub(crate) fn notify_while(&self, event: &E, proceed: impl Fn() -> bool) {
		let snapshot: Vec<Rc<dyn Fn(&E)>> = self
			.entries
			.borrow()
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect();

		for listener in snapshot {
			if !proceed() {
				break;
			}
			listener(event);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_notify_in_registration_order() {
		let listeners: Listeners<i32> = Listeners::new();
		let seen = Rc::new(RefCell::new(Vec::new()));

		for tag in ["first", "second"] {
			let seen = Rc::clone(&seen);
			listeners.add(Rc::new(move |value: &i32| {
				seen.borrow_mut().push(format!("{}:{}", tag, value));
			}));
		}

		listeners.notify(&7);

		assert_eq!(*seen.borrow(), vec!["first:7", "second:7"]);
	}

	#[rstest]
	fn test_remove() {
		let listeners: Listeners<()> = Listeners::new();
		let id = listeners.add(Rc::new(|_: &()| {}));
		listeners.add(Rc::new(|_: &()| {}));

		assert!(listeners.remove(id));
		assert!(!listeners.remove(id));
		assert_eq!(listeners.len(), 1);
	}

	#[rstest]
	fn test_notify_while_stops_once_declined() {
		let listeners: Listeners<()> = Listeners::new();
		let calls = Rc::new(Cell::new(0));
		for _ in 0..3 {
			let calls = Rc::clone(&calls);
			listeners.add(Rc::new(move |_: &()| calls.set(calls.get() + 1)));
		}

		listeners.notify_while(&(), || calls.get() < 2);

		assert_eq!(calls.get(), 2);
	}

	#[rstest]
	fn test_listener_may_unregister_itself_during_notify() {
		let listeners: Rc<Listeners<()>> = Rc::new(Listeners::new());
		let own_id = Rc::new(Cell::new(None));
		let calls = Rc::new(Cell::new(0));

		let weak = Rc::downgrade(&listeners);
		let id = {
			let own_id = Rc::clone(&own_id);
			let calls = Rc::clone(&calls);
			listeners.add(Rc::new(move |_: &()| {
				calls.set(calls.get() + 1);
				if let (Some(listeners), Some(id)) = (weak.upgrade(), own_id.get()) {
					listeners.remove(id);
				}
			}))
		};
		own_id.set(Some(id));

		listeners.notify(&());
		listeners.notify(&());

		assert_eq!(calls.get(), 1);
		assert_eq!(listeners.len(), 0);
	}
}
