//! Signal - the reactive value cell.
//!
//! `Signal<T>` holds a value behind `Rc<RefCell<T>>` and keeps its own list
//! of subscribed effects. Reading the value inside an effect subscribes the
//! effect; writing the value re-runs every live subscriber synchronously.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::runtime::{EffectCell, active_observer};

/// A reactive value that notifies dependent effects when it changes.
///
/// Clones share the same underlying value and subscriber list, so a signal
/// can be captured by several event handlers and effects at once.
///
/// # Example
///
/// ```
/// use atoll_core::Signal;
///
/// let count = Signal::new(0);
/// count.set(42);
/// assert_eq!(count.get(), 42);
///
/// count.update(|n| *n += 1);
/// assert_eq!(count.get(), 43);
/// ```
pub struct Signal<T: 'static> {
	/// The current value, shared between clones.
	value: Rc<RefCell<T>>,
	/// Effects to notify on change. Entries are weak; a dropped effect is
	/// compacted away on the next notification.
	subscribers: Rc<RefCell<Vec<Weak<EffectCell>>>>,
}

impl<T: 'static> Signal<T> {
	/// Creates a new signal with the given initial value.
	pub fn new(value: T) -> Self {
		Self {
			value: Rc::new(RefCell::new(value)),
			subscribers: Rc::new(RefCell::new(Vec::new())),
		}
	}

	/// Returns the current value, subscribing the running effect (if any).
	pub fn get(&self) -> T
	where
		T: Clone,
	{
		self.track();
		self.get_untracked()
	}

	/// Returns the current value without subscribing anything.
	pub fn get_untracked(&self) -> T
	where
		T: Clone,
	{
		self.value.borrow().clone()
	}

	/// Reads the current value through a closure, subscribing the running
	/// effect (if any).
	///
	/// Useful when `T` is not `Clone` or cloning would be wasteful.
	pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
		self.track();
		f(&self.value.borrow())
	}

	/// Replaces the value and notifies subscribers.
	pub fn set(&self, value: T) {
		*self.value.borrow_mut() = value;
		self.notify();
	}

	/// Updates the value in place and notifies subscribers once.
	pub fn update<F>(&self, f: F)
	where
		F: FnOnce(&mut T),
	{
		f(&mut self.value.borrow_mut());
		self.notify();
	}

	/// Subscribes the currently running effect to this signal.
	fn track(&self) {
		let Some(observer) = active_observer() else {
			return;
		};

		let mut subscribers = self.subscribers.borrow_mut();
		let already_subscribed = subscribers
			.iter()
			.any(|existing| Weak::ptr_eq(existing, &observer));
		if !already_subscribed {
			subscribers.push(observer);
		}
	}

	/// Re-runs every live subscriber and drops dead ones.
	fn notify(&self) {
		// Collect strong references first: a subscriber re-running may
		// subscribe itself again, which borrows the list.
		let live: Vec<Rc<EffectCell>> = {
			let mut subscribers = self.subscribers.borrow_mut();
			subscribers.retain(|weak| {
				weak.upgrade().is_some_and(|cell| !cell.is_disposed())
			});
			subscribers.iter().filter_map(Weak::upgrade).collect()
		};

		for effect in live {
			EffectCell::run(&effect);
		}
	}

	/// Returns the number of live subscribers. Mainly for tests.
	pub fn subscriber_count(&self) -> usize {
		self.subscribers
			.borrow()
			.iter()
			.filter(|weak| weak.upgrade().is_some())
			.count()
	}
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			value: Rc::clone(&self.value),
			subscribers: Rc::clone(&self.subscribers),
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &*self.value.borrow())
			.finish()
	}
}
