//! Per-island error isolation.
//!
//! Every island is wrapped in an [`ErrorBoundary`] before binding. While
//! the island raises no error the boundary is invisible; on the first
//! error it replaces the island's markup with a visible fallback and
//! never renders the island again. One island's failure cannot reach its
//! siblings.

use std::cell::Cell;
use std::rc::Rc;

use crate::component::{ElementView, IntoView, View};
use crate::dom::{Document, Element};
use crate::error::HydrateError;
use crate::error_log;
use crate::metrics::HydrationMetrics;

/// The boundary's two states. The transition is one-way: a failed island
/// stays failed until a full remount (page reload).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryState {
	/// The island has raised no error.
	Healthy,
	/// The island raised an error; the fallback is showing.
	Failed,
}

/// Shared handle to an island's error boundary.
pub type BoundaryHandle = Rc<ErrorBoundary>;

/// Failure isolator for a single island instance.
///
/// Created by the hydration driver before binding. Later re-renders and
/// async completions route through [`guard`](ErrorBoundary::guard) so a
/// failure at any point lands here rather than escaping the island.
pub struct ErrorBoundary {
	name: String,
	element: Element,
	metrics: HydrationMetrics,
	document: Document,
	state: Cell<BoundaryState>,
}

impl ErrorBoundary {
	/// Creates a boundary for the named island over its marker element.
	pub fn new(
		name: String,
		element: Element,
		metrics: HydrationMetrics,
		document: Document,
	) -> BoundaryHandle {
		Rc::new(Self {
			name,
			element,
			metrics,
			document,
			state: Cell::new(BoundaryState::Healthy),
		})
	}

	/// Returns the island's component name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the current state.
	pub fn state(&self) -> BoundaryState {
		self.state.get()
	}

	/// Returns whether the boundary has tripped.
	pub fn is_failed(&self) -> bool {
		self.state.get() == BoundaryState::Failed
	}

	/// Trips the boundary: logs, counts one error, and replaces the
	/// island's markup with the fallback.
	///
	/// Idempotent: a boundary that already failed ignores further
	/// errors, so `errors` increments exactly once per island instance.
	pub fn fail(&self, error: &HydrateError) {
		if self.is_failed() {
			return;
		}
		self.state.set(BoundaryState::Failed);

		error_log!("error hydrating island {}: {}", self.name, error);
		self.metrics.record_error();
		// An external error-tracking submission would go here; not implemented.

		let detail = error.to_string();
		let fallback = fallback_view(cfg!(debug_assertions).then_some(detail.as_str()));
		self.element.clear_children();
		if let Err(mount_err) = fallback.mount(&self.element, &self.document) {
			error_log!(
				"failed to render fallback for island {}: {}",
				self.name,
				mount_err
			);
		}
	}

	/// Runs `f` unless the boundary already failed; an `Err` trips it.
	///
	/// Island re-renders triggered by interactions or async completions go
	/// through here, so a failed island is never rendered again.
	pub fn guard(&self, f: impl FnOnce() -> Result<(), HydrateError>) {
		if self.is_failed() {
			return;
		}
		if let Err(error) = f() {
			self.fail(&error);
		}
	}
}

impl std::fmt::Debug for ErrorBoundary {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ErrorBoundary")
			.field("name", &self.name)
			.field("state", &self.state.get())
			.finish()
	}
}

/// The fallback markup shown for a failed island.
///
/// `role="alert"` with a generic message; the error detail is included
/// only when `detail` is passed (debug builds).
pub fn fallback_view(detail: Option<&str>) -> View {
	let mut view = ElementView::new("div")
		.attr("class", "island-error")
		.attr("role", "alert")
		.child(ElementView::new("p").child("Something went wrong loading this component."));
	if let Some(detail) = detail {
		view = view.child(ElementView::new("pre").child(detail.to_string()));
	}
	view.into_view()
}
