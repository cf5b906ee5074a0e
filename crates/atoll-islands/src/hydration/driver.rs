//! The hydration driver.
//!
//! For every island descriptor the driver resolves the component, wraps it
//! in an error boundary, and binds it to the existing markup, each island
//! as its own asynchronous task, launched fire-and-forget with no ordering
//! between islands. The only state tasks share is the append-only
//! hydrated-set and the monotonic metrics record, both safe under
//! single-threaded interleaving.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use super::boundary::ErrorBoundary;
use super::scanner::{IslandDescriptor, IslandScanner};
use super::{IslandContext, retain};
use crate::debug_log;
use crate::dom::{Document, Element};
use crate::error::HydrateError;
use crate::error_log;
use crate::metrics::HydrationMetrics;
use crate::registry::ComponentRegistry;
use crate::spawn;

/// Identity set of elements hydrated during this page's lifetime.
///
/// An element is added at most once and never removed; the set is
/// cleared only by a full page reload. Membership is by node identity,
/// not by markup equality.
#[derive(Default)]
pub struct HydratedSet {
	elements: Vec<Element>,
}

impl HydratedSet {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns whether the element is already hydrated.
	pub fn contains(&self, element: &Element) -> bool {
		self.elements.iter().any(|e| e.same_as(element))
	}

	/// Adds the element; returns `false` if it was already present.
	pub fn insert(&mut self, element: &Element) -> bool {
		if self.contains(element) {
			return false;
		}
		self.elements.push(element.clone());
		true
	}

	/// Returns the number of hydrated elements.
	pub fn len(&self) -> usize {
		self.elements.len()
	}

	/// Returns whether the set is empty.
	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}
}

/// One island's hydration, packaged as an explicit awaitable task.
///
/// The driver launches tasks fire-and-forget on the page; tests can
/// instead await each task individually. No ordering between tasks is
/// guaranteed or required.
pub struct IslandTask {
	component: String,
	future: Pin<Box<dyn Future<Output = Result<(), HydrateError>>>>,
}

impl IslandTask {
	/// Returns the component name this task hydrates.
	pub fn component(&self) -> &str {
		&self.component
	}

	/// Runs the task to completion.
	pub async fn run(self) -> Result<(), HydrateError> {
		self.future.await
	}

	/// Launches the task fire-and-forget.
	///
	/// Failures are already logged and counted inside the task; the
	/// launch result is intentionally dropped.
	pub fn launch(self) {
		let component = self.component.clone();
		spawn::spawn_local(async move {
			if let Err(error) = self.future.await {
				debug_log!("island {} was not hydrated: {}", component, error);
			}
		});
	}
}

impl std::fmt::Debug for IslandTask {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("IslandTask")
			.field("component", &self.component)
			.finish()
	}
}

struct DriverInner {
	registry: ComponentRegistry,
	metrics: HydrationMetrics,
	hydrated: RefCell<HydratedSet>,
}

/// Hydrates islands found in a document.
///
/// Cloning the driver is cheap and shares the hydrated-set, so a second
/// invocation over the same document skips everything the first one
/// already hydrated (idempotence).
#[derive(Clone)]
pub struct HydrationDriver {
	inner: Rc<DriverInner>,
}

impl HydrationDriver {
	/// Creates a driver over the given registry and metrics handles.
	pub fn new(registry: ComponentRegistry, metrics: HydrationMetrics) -> Self {
		Self {
			inner: Rc::new(DriverInner {
				registry,
				metrics,
				hydrated: RefCell::new(HydratedSet::new()),
			}),
		}
	}

	/// Returns the shared metrics handle.
	pub fn metrics(&self) -> HydrationMetrics {
		self.inner.metrics.clone()
	}

	/// Returns how many elements have been hydrated so far.
	pub fn hydrated_count(&self) -> usize {
		self.inner.hydrated.borrow().len()
	}

	/// Scans the document and launches one fire-and-forget task per
	/// island found.
	pub fn hydrate_document(&self, document: &Document) {
		for task in self.island_tasks(document) {
			task.launch();
		}
	}

	/// Scans the document and returns one task per island found, without
	/// launching anything.
	pub fn island_tasks(&self, document: &Document) -> Vec<IslandTask> {
		IslandScanner::new(document.clone())
			.scan()
			.into_iter()
			.map(|descriptor| self.task(document, descriptor))
			.collect()
	}

	/// Packages a single descriptor as a task.
	pub fn task(&self, document: &Document, descriptor: IslandDescriptor) -> IslandTask {
		let inner = Rc::clone(&self.inner);
		let document = document.clone();
		IslandTask {
			component: descriptor.component.clone(),
			future: Box::pin(hydrate_island(inner, document, descriptor)),
		}
	}
}

impl std::fmt::Debug for HydrationDriver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HydrationDriver")
			.field("hydrated", &self.hydrated_count())
			.finish()
	}
}

/// Hydrates one island: the per-descriptor contract.
///
/// The body does not yield between the hydrated-set check and the success
/// record, so a driver invoked twice on the same document state cannot
/// double-hydrate an element.
async fn hydrate_island(
	inner: Rc<DriverInner>,
	document: Document,
	descriptor: IslandDescriptor,
) -> Result<(), HydrateError> {
	let IslandDescriptor {
		component,
		props,
		element,
	} = descriptor;

	// 1. Idempotence: skip elements hydrated earlier in this page's life.
	if inner.hydrated.borrow().contains(&element) {
		debug_log!("island {} already hydrated, skipping", component);
		return Ok(());
	}

	// 2. Resolve the component; a registry miss skips this island only.
	let factory = match inner.registry.resolve(&component) {
		Ok(factory) => factory,
		Err(error) => {
			error_log!("{}", error);
			inner.metrics.record_error();
			return Err(error);
		}
	};
	let island = factory(&props);

	// 3. Error boundary bound to this island's name and element.
	let boundary = ErrorBoundary::new(
		component.clone(),
		element.clone(),
		inner.metrics.clone(),
		document.clone(),
	);
	let ctx = IslandContext::new(
		component.clone(),
		Rc::clone(&boundary),
		inner.metrics.clone(),
		document,
	);

	// 4. Bind to the existing markup in place.
	match island.bind(&element, &ctx) {
		Ok(()) => {
			// 5. Record success.
			inner.hydrated.borrow_mut().insert(&element);
			inner.metrics.record_hydrated();
			retain(ctx);
			Ok(())
		}
		Err(error) => {
			// 6. The boundary shows the fallback and counts the error;
			// the element is never marked hydrated.
			boundary.fail(&error);
			Err(error)
		}
	}
}
