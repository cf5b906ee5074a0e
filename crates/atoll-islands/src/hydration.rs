//! Client-side hydration: scanning, driving, and isolating islands.
//!
//! The flow is scanner → driver → (registry lookup → boundary wrap → bind
//! to existing markup), with the metrics recorder observing every outcome.
//! Each island is an independent task; nothing an island does can abort
//! its siblings.

mod attach;
mod boundary;
mod driver;
mod scanner;

use std::any::Any;
use std::cell::RefCell;

pub use attach::attach_handlers;
pub use boundary::{BoundaryHandle, BoundaryState, ErrorBoundary, fallback_view};
pub use driver::{HydratedSet, HydrationDriver, IslandTask};
pub use scanner::{
	COMPONENT_ATTR, ISLAND_ATTR, IslandDescriptor, IslandScanner, PROPS_ATTR,
};

use crate::dom::Document;
#[cfg(all(test, not(target_arch = "wasm32")))]
use crate::dom::Element;
use crate::metrics::HydrationMetrics;

/// Per-island hydration context handed to [`Island::bind`].
///
/// Carries the island's name, its error boundary, the shared metrics
/// handle, and the document (for re-renders that must create nodes).
/// Cloning is cheap; clones refer to the same boundary and metrics.
///
/// [`Island::bind`]: crate::component::Island::bind
#[derive(Clone)]
pub struct IslandContext {
	name: String,
	boundary: BoundaryHandle,
	metrics: HydrationMetrics,
	document: Document,
}

impl IslandContext {
	pub(crate) fn new(
		name: String,
		boundary: BoundaryHandle,
		metrics: HydrationMetrics,
		document: Document,
	) -> Self {
		Self {
			name,
			boundary,
			metrics,
			document,
		}
	}

	/// Returns the island's component name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the island's error boundary.
	pub fn boundary(&self) -> &BoundaryHandle {
		&self.boundary
	}

	/// Returns the shared metrics handle.
	pub fn metrics(&self) -> &HydrationMetrics {
		&self.metrics
	}

	/// Returns the document the island lives in.
	pub fn document(&self) -> &Document {
		&self.document
	}

	/// Parks a value (event handle, effect) in the page-lifetime keepalive
	/// store so it outlives the hydration call.
	pub fn retain<T: 'static>(&self, value: T) {
		retain(value);
	}

	/// Builds a context for unit tests, with a fresh boundary over the
	/// given element and an empty document.
	#[cfg(all(test, not(target_arch = "wasm32")))]
	pub(crate) fn for_tests(name: &str, element: &Element, metrics: HydrationMetrics) -> Self {
		let document = Document::new();
		let boundary =
			ErrorBoundary::new(name.to_string(), element.clone(), metrics.clone(), document.clone());
		Self::new(name.to_string(), boundary, metrics, document)
	}
}

impl std::fmt::Debug for IslandContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("IslandContext")
			.field("name", &self.name)
			.finish()
	}
}

thread_local! {
	static RETAINED: RefCell<Vec<Box<dyn Any>>> = const { RefCell::new(Vec::new()) };
}

/// Parks a value for the rest of the page's life.
///
/// Hydration has no teardown: event handles and effects created while
/// binding an island stay live until a full page reload. Dropping them
/// earlier would detach listeners and stop effects.
pub fn retain<T: 'static>(value: T) {
	RETAINED.with(|retained| retained.borrow_mut().push(Box::new(value)));
}

/// Returns the number of values in the keepalive store.
pub fn retained_count() -> usize {
	RETAINED.with(|retained| retained.borrow().len())
}

/// Empties the keepalive store.
///
/// The browser never needs this (the store dies with the page); tests use
/// it to simulate a page unload between cases.
pub fn clear_retained() {
	RETAINED.with(|retained| retained.borrow_mut().clear());
}
