//! Effect - reactive side effects.
//!
//! An `Effect` runs its closure immediately on creation and again whenever a
//! signal it read changes. Notification is synchronous: `Signal::set`
//! returns after every dependent effect has re-run.

use std::rc::Rc;

use super::runtime::EffectCell;

/// A side effect that re-runs when its signal dependencies change.
///
/// Effects are the bridge between signals and the outside world (the DOM,
/// the console). Dependencies are tracked automatically: every
/// `Signal::get()` call made while the closure runs subscribes this effect
/// to that signal.
///
/// The `Effect` handle owns the closure. Dropping the handle disposes the
/// effect; keep it alive (for example in a hydration keepalive store) for
/// as long as the effect should keep firing.
///
/// # Example
///
/// ```
/// use atoll_core::{Effect, Signal};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let count = Signal::new(0);
/// let doubled = Rc::new(Cell::new(0));
///
/// let _effect = Effect::new({
///     let count = count.clone();
///     let doubled = doubled.clone();
///     move || doubled.set(count.get() * 2)
/// });
///
/// count.set(5);
/// assert_eq!(doubled.get(), 10);
/// ```
pub struct Effect {
	cell: Rc<EffectCell>,
}

impl Effect {
	/// Creates a new effect and runs it once immediately.
	pub fn new<F>(f: F) -> Self
	where
		F: FnMut() + 'static,
	{
		let cell = EffectCell::new(f);
		EffectCell::run(&cell);
		Self { cell }
	}

	/// Disposes the effect; it will never run again.
	///
	/// Signals holding a subscription to this effect drop it on their next
	/// notification.
	pub fn dispose(&self) {
		self.cell.dispose();
	}

	/// Returns whether the effect has been disposed.
	pub fn is_disposed(&self) -> bool {
		self.cell.is_disposed()
	}
}

impl Drop for Effect {
	fn drop(&mut self) {
		self.cell.dispose();
	}
}

impl std::fmt::Debug for Effect {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Effect")
			.field("disposed", &self.is_disposed())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::Signal;
	use std::cell::RefCell;

	#[test]
	fn test_effect_runs_immediately() {
		let runs = Rc::new(RefCell::new(0));
		let runs_clone = runs.clone();

		let _effect = Effect::new(move || {
			*runs_clone.borrow_mut() += 1;
		});

		assert_eq!(*runs.borrow(), 1);
	}

	#[test]
	fn test_effect_reruns_on_signal_change() {
		let signal = Signal::new(0);
		let values = Rc::new(RefCell::new(Vec::new()));
		let values_clone = values.clone();

		let signal_clone = signal.clone();
		let _effect = Effect::new(move || {
			values_clone.borrow_mut().push(signal_clone.get());
		});

		assert_eq!(*values.borrow(), vec![0]);

		signal.set(10);
		assert_eq!(*values.borrow(), vec![0, 10]);

		signal.set(20);
		assert_eq!(*values.borrow(), vec![0, 10, 20]);
	}

	#[test]
	fn test_effect_with_multiple_signals() {
		let first = Signal::new(1);
		let second = Signal::new(2);
		let sum = Rc::new(RefCell::new(0));
		let sum_clone = sum.clone();

		let f = first.clone();
		let s = second.clone();
		let _effect = Effect::new(move || {
			*sum_clone.borrow_mut() = f.get() + s.get();
		});

		assert_eq!(*sum.borrow(), 3);

		first.set(10);
		assert_eq!(*sum.borrow(), 12);

		second.set(20);
		assert_eq!(*sum.borrow(), 30);
	}

	#[test]
	fn test_effect_dispose() {
		let signal = Signal::new(0);
		let runs = Rc::new(RefCell::new(0));
		let runs_clone = runs.clone();

		let signal_clone = signal.clone();
		let effect = Effect::new(move || {
			let _ = signal_clone.get();
			*runs_clone.borrow_mut() += 1;
		});

		assert_eq!(*runs.borrow(), 1);

		effect.dispose();
		signal.set(10);
		assert_eq!(*runs.borrow(), 1);
	}

	#[test]
	fn test_effect_drop_unsubscribes() {
		let signal = Signal::new(0);
		let runs = Rc::new(RefCell::new(0));
		let runs_clone = runs.clone();

		{
			let signal_clone = signal.clone();
			let _effect = Effect::new(move || {
				let _ = signal_clone.get();
				*runs_clone.borrow_mut() += 1;
			});
			assert_eq!(*runs.borrow(), 1);
		}

		signal.set(10);
		assert_eq!(*runs.borrow(), 1);
		assert_eq!(signal.subscriber_count(), 0);
	}

	#[test]
	fn test_effect_writing_own_dependency_does_not_recurse() {
		let signal = Signal::new(0);
		let runs = Rc::new(RefCell::new(0));
		let runs_clone = runs.clone();

		let signal_clone = signal.clone();
		let _effect = Effect::new(move || {
			*runs_clone.borrow_mut() += 1;
			let current = signal_clone.get();
			if current < 1 {
				signal_clone.set(current + 1);
			}
		});

		// Initial run writes the signal; the re-entrancy guard keeps the
		// write from re-entering the already-running effect.
		assert_eq!(signal.get_untracked(), 1);
		assert!(*runs.borrow() <= 2);
	}
}
