//! Observer bookkeeping shared between signals and effects.
//!
//! While an effect is executing, a weak reference to it sits on a
//! thread-local observer stack. A `Signal::get()` call inspects the top of
//! the stack and subscribes that effect to the signal. The stack (rather
//! than a single slot) keeps tracking correct when an effect's execution
//! synchronously triggers another effect.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Type alias for the closure stored inside an effect.
type EffectFn = Box<dyn FnMut() + 'static>;

/// Shared state of a single effect.
///
/// Signals hold `Weak<EffectCell>` subscriber entries; the owning
/// [`Effect`](super::Effect) handle holds the only strong reference, so
/// dropping the handle unsubscribes the effect everywhere at once.
pub(crate) struct EffectCell {
	/// The effect closure.
	func: RefCell<EffectFn>,
	/// Set by `Effect::dispose`; a disposed effect never runs again.
	disposed: Cell<bool>,
	/// Re-entrancy guard: an effect that writes one of its own
	/// dependencies must not re-enter itself.
	running: Cell<bool>,
}

impl EffectCell {
	/// Wraps an effect closure.
	pub(crate) fn new<F>(f: F) -> Rc<Self>
	where
		F: FnMut() + 'static,
	{
		Rc::new(Self {
			func: RefCell::new(Box::new(f)),
			disposed: Cell::new(false),
			running: Cell::new(false),
		})
	}

	/// Executes the effect with dependency tracking enabled.
	pub(crate) fn run(cell: &Rc<Self>) {
		if cell.disposed.get() || cell.running.get() {
			return;
		}

		cell.running.set(true);
		push_observer(Rc::downgrade(cell));

		(cell.func.borrow_mut())();

		pop_observer();
		cell.running.set(false);
	}

	/// Marks the effect as disposed.
	pub(crate) fn dispose(&self) {
		self.disposed.set(true);
	}

	/// Returns whether the effect has been disposed.
	pub(crate) fn is_disposed(&self) -> bool {
		self.disposed.get()
	}
}

thread_local! {
	static OBSERVER_STACK: RefCell<Vec<Weak<EffectCell>>> = const { RefCell::new(Vec::new()) };
}

/// Returns the effect currently executing, if any.
pub(crate) fn active_observer() -> Option<Weak<EffectCell>> {
	OBSERVER_STACK.with(|stack| stack.borrow().last().cloned())
}

fn push_observer(observer: Weak<EffectCell>) {
	OBSERVER_STACK.with(|stack| stack.borrow_mut().push(observer));
}

fn pop_observer() {
	OBSERVER_STACK.with(|stack| {
		stack.borrow_mut().pop();
	});
}
