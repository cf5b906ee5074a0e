//! Hydration metrics.
//!
//! A process-wide-per-page record of how hydration went: a start
//! timestamp and two monotonically non-decreasing counters. The recorder
//! is an explicitly owned, injectable handle; the launcher creates one
//! per page and passes it down, and tests substitute an isolated instance
//! per case. This module performs pure local aggregation; nothing is
//! transmitted anywhere.

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;

use crate::info_log;

#[cfg(target_arch = "wasm32")]
type StartStamp = f64;

#[cfg(not(target_arch = "wasm32"))]
type StartStamp = std::time::Instant;

struct MetricsInner {
	start: StartStamp,
	components_hydrated: Cell<u64>,
	errors: Cell<u64>,
}

/// Monotonic hydration counters plus a start timestamp.
///
/// Cloning is cheap; clones share the same record. Counters only ever
/// increase within a page lifetime.
///
/// # Example
///
/// ```
/// use atoll_islands::metrics::HydrationMetrics;
///
/// let metrics = HydrationMetrics::new();
/// metrics.record_hydrated();
/// metrics.record_error();
/// assert_eq!(metrics.components_hydrated(), 1);
/// assert_eq!(metrics.errors(), 1);
/// ```
#[derive(Clone)]
pub struct HydrationMetrics {
	inner: Rc<MetricsInner>,
}

/// One-shot diagnostic summary emitted on page load.
#[derive(Debug, Clone, Serialize)]
pub struct HydrationSummary {
	/// Number of islands successfully hydrated.
	pub components_hydrated: u64,
	/// Number of island errors (registry misses and boundary trips).
	pub errors: u64,
	/// Milliseconds elapsed since the recorder was created.
	pub elapsed_ms: f64,
}

impl HydrationMetrics {
	/// Creates a new record with the start timestamp taken now.
	pub fn new() -> Self {
		Self {
			inner: Rc::new(MetricsInner {
				start: now(),
				components_hydrated: Cell::new(0),
				errors: Cell::new(0),
			}),
		}
	}

	/// Counts one successfully hydrated island.
	pub fn record_hydrated(&self) {
		let counter = &self.inner.components_hydrated;
		counter.set(counter.get() + 1);
	}

	/// Counts one island error.
	pub fn record_error(&self) {
		let counter = &self.inner.errors;
		counter.set(counter.get() + 1);
	}

	/// Returns the hydrated-island count.
	pub fn components_hydrated(&self) -> u64 {
		self.inner.components_hydrated.get()
	}

	/// Returns the error count.
	pub fn errors(&self) -> u64 {
		self.inner.errors.get()
	}

	/// Returns milliseconds elapsed since the recorder was created.
	pub fn elapsed_ms(&self) -> f64 {
		elapsed_since(&self.inner.start)
	}

	/// Builds the diagnostic summary for the current counter values.
	pub fn summary(&self) -> HydrationSummary {
		HydrationSummary {
			components_hydrated: self.components_hydrated(),
			errors: self.errors(),
			elapsed_ms: self.elapsed_ms(),
		}
	}

	/// Emits the one-shot diagnostic summary.
	pub fn report(&self) {
		let summary = self.summary();
		info_log!(
			"island hydration metrics: {}",
			serde_json::to_string(&summary).unwrap_or_else(|_| format!("{summary:?}"))
		);
	}

	/// Schedules [`report`](Self::report) for the page's `load` event.
	#[cfg(target_arch = "wasm32")]
	pub fn report_on_load(&self) {
		use wasm_bindgen::JsCast;
		use wasm_bindgen::closure::Closure;

		let Some(window) = web_sys::window() else {
			return;
		};

		let metrics = self.clone();
		let closure = Closure::once(move || metrics.report());
		if window
			.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())
			.is_ok()
		{
			// The listener fires at most once per page; leaking the
			// closure keeps it callable until then.
			closure.forget();
		}
	}

	/// Non-WASM version: reports immediately (there is no load event).
	#[cfg(not(target_arch = "wasm32"))]
	pub fn report_on_load(&self) {
		self.report();
	}
}

impl Default for HydrationMetrics {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for HydrationMetrics {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HydrationMetrics")
			.field("components_hydrated", &self.components_hydrated())
			.field("errors", &self.errors())
			.finish()
	}
}

#[cfg(target_arch = "wasm32")]
fn now() -> f64 {
	web_sys::window()
		.and_then(|window| window.performance())
		.map(|performance| performance.now())
		.unwrap_or_else(js_sys::Date::now)
}

#[cfg(target_arch = "wasm32")]
fn elapsed_since(start: &f64) -> f64 {
	now() - start
}

#[cfg(not(target_arch = "wasm32"))]
fn now() -> std::time::Instant {
	std::time::Instant::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn elapsed_since(start: &std::time::Instant) -> f64 {
	start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_counters_start_at_zero() {
		let metrics = HydrationMetrics::new();
		assert_eq!(metrics.components_hydrated(), 0);
		assert_eq!(metrics.errors(), 0);
	}

	#[test]
	fn test_counters_are_monotonic() {
		let metrics = HydrationMetrics::new();
		let mut last = 0;
		for _ in 0..5 {
			metrics.record_hydrated();
			let current = metrics.components_hydrated();
			assert!(current > last);
			last = current;
		}
	}

	#[test]
	fn test_clones_share_the_record() {
		let metrics = HydrationMetrics::new();
		let clone = metrics.clone();

		metrics.record_hydrated();
		clone.record_error();

		assert_eq!(clone.components_hydrated(), 1);
		assert_eq!(metrics.errors(), 1);
	}

	#[test]
	fn test_instances_are_isolated() {
		let first = HydrationMetrics::new();
		let second = HydrationMetrics::new();

		first.record_hydrated();

		assert_eq!(first.components_hydrated(), 1);
		assert_eq!(second.components_hydrated(), 0);
	}

	#[test]
	fn test_summary_reflects_counters() {
		let metrics = HydrationMetrics::new();
		metrics.record_hydrated();
		metrics.record_hydrated();
		metrics.record_error();

		let summary = metrics.summary();
		assert_eq!(summary.components_hydrated, 2);
		assert_eq!(summary.errors, 1);
		assert!(summary.elapsed_ms >= 0.0);
	}

	#[test]
	fn test_summary_serializes() {
		let metrics = HydrationMetrics::new();
		metrics.record_hydrated();

		let json = serde_json::to_string(&metrics.summary()).unwrap();
		assert!(json.contains("\"components_hydrated\":1"));
		assert!(json.contains("\"errors\":0"));
		assert!(json.contains("elapsed_ms"));
	}
}
