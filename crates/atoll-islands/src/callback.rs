//! Callback types and event handler conversion traits.
//!
//! [`Callback`] is a type-safe, cheaply cloneable wrapper for event
//! handlers, and [`IntoEventHandler`] converts closures, `Callback`s, and
//! raw handler references into the [`ViewEventHandler`] stored on view
//! elements.
//!
//! Handlers are `Rc`-based on every target: the native side of this crate
//! exists for single-threaded tests, not multi-threaded rendering, so no
//! `Send + Sync` split is needed.

use std::rc::Rc;

use crate::component::ViewEventHandler;
use crate::dom::Event;

/// A type-safe, cloneable callback wrapper.
///
/// Wrapping a handler in `Callback` gives it a stable identity that can be
/// cloned into several view nodes, the way the original markup shares
/// memoized handlers between renders.
///
/// # Example
///
/// ```
/// use atoll_islands::Callback;
///
/// let double = Callback::new(|n: i32| n * 2);
/// assert_eq!(double.call(21), 42);
/// ```
pub struct Callback<Args = Event, Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> std::fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}

/// Trait for converting handler values into a [`ViewEventHandler`].
///
/// Implemented for closures taking an event argument and for [`Callback`].
pub trait IntoEventHandler {
	/// Converts self into a [`ViewEventHandler`].
	fn into_event_handler(self) -> ViewEventHandler;
}

impl<F> IntoEventHandler for F
where
	F: Fn(Event) + 'static,
{
	fn into_event_handler(self) -> ViewEventHandler {
		Rc::new(self)
	}
}

impl IntoEventHandler for Callback<Event, ()> {
	fn into_event_handler(self) -> ViewEventHandler {
		self.inner
	}
}

/// Event handler helper with a concrete argument type.
///
/// Unlike [`IntoEventHandler::into_event_handler`] on a bare closure, this
/// function fixes the argument type so the closure parameter can be
/// elided.
///
/// # Example
///
/// ```
/// use atoll_islands::event_handler;
///
/// let handler = event_handler(|_| {});
/// handler(Default::default());
/// ```
pub fn event_handler(f: impl Fn(Event) + 'static) -> ViewEventHandler {
	Rc::new(f)
}
