//! Page entry points.
//!
//! The production path is `hydrateIslands`: scan the document and launch
//! one task per island. The `mountCounter`/`mountUserProfile` exports
//! carry the standalone-mount contract: when an island ships as its own
//! chunk, its export self-mounts into the first matching marked element
//! using the same attribute contract.

use crate::dom::Document;
use crate::hydration::{COMPONENT_ATTR, HydrationDriver, IslandScanner, IslandTask};
use crate::metrics::HydrationMetrics;
use crate::registry::ComponentRegistry;
use crate::warn_log;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

/// Hydrates every island in the document with the built-in registry,
/// launching one fire-and-forget task per island. Returns the driver so
/// callers (and tests) can observe progress.
pub fn hydrate_document_with(document: &Document, metrics: HydrationMetrics) -> HydrationDriver {
	let driver = HydrationDriver::new(ComponentRegistry::with_builtins(), metrics);
	driver.hydrate_document(document);
	driver
}

/// Builds the standalone-mount task for the first element declaring the
/// given component, or `None` when the page has no such element.
pub fn standalone_task(
	document: &Document,
	component: &str,
	metrics: HydrationMetrics,
) -> Option<IslandTask> {
	let selector = format!("[{COMPONENT_ATTR}=\"{component}\"]");
	let Some(element) = document.query_selector(&selector) else {
		warn_log!("no element matching {} to mount", selector);
		return None;
	};

	let descriptor = IslandScanner::describe(&element)?;
	let driver = HydrationDriver::new(ComponentRegistry::with_builtins(), metrics);
	Some(driver.task(document, descriptor))
}

/// Entry point for the all-islands hydration chunk.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = hydrateIslands)]
pub fn hydrate_islands() {
	init_panic_hook();
	let metrics = HydrationMetrics::new();
	metrics.report_on_load();
	hydrate_document_with(&crate::dom::document(), metrics);
}

/// Entry point for the standalone counter chunk.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = mountCounter)]
pub fn mount_counter() {
	mount_standalone("Counter");
}

/// Entry point for the standalone user-profile chunk.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = mountUserProfile)]
pub fn mount_user_profile() {
	mount_standalone("UserProfile");
}

#[cfg(target_arch = "wasm32")]
fn mount_standalone(component: &str) {
	init_panic_hook();
	let metrics = HydrationMetrics::new();
	metrics.report_on_load();
	if let Some(task) = standalone_task(&crate::dom::document(), component, metrics) {
		task.launch();
	}
}

#[cfg(target_arch = "wasm32")]
fn init_panic_hook() {
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();
}
