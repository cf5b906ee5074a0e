//! Browser tests for the hydration pipeline.
//!
//! Run with `wasm-pack test --chrome --headless`. The page body is seeded
//! with server-style island markup (rendered through the same view tree
//! the server would use), then the driver hydrates it in place.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use atoll_islands::component::Island;
use atoll_islands::dom::Document;
use atoll_islands::hydration::HydrationDriver;
use atoll_islands::islands::{Counter, UserProfile};
use atoll_islands::metrics::HydrationMetrics;
use atoll_islands::registry::ComponentRegistry;
use gloo_timers::future::TimeoutFuture;

wasm_bindgen_test_configure!(run_in_browser);

/// Seeds the page body and returns the wrapped document.
fn page_with(body_html: &str) -> Document {
	let document = web_sys::window().unwrap().document().unwrap();
	document.body().unwrap().set_inner_html(body_html);
	Document::new(document)
}

fn counter_markup(initial: i64) -> String {
	let inner = Counter::new(initial).render().render_to_string();
	format!(
		"<div data-island data-component=\"Counter\" data-props='{{\"initialCount\": {initial}}}'>{inner}</div>"
	)
}

fn profile_markup(user_id: &str) -> String {
	let inner = UserProfile::new(user_id).render().render_to_string();
	format!(
		"<div data-island data-component=\"UserProfile\" data-props='{{\"userId\": \"{user_id}\"}}'>{inner}</div>"
	)
}

fn driver_with(metrics: &HydrationMetrics) -> HydrationDriver {
	HydrationDriver::new(ComponentRegistry::with_builtins(), metrics.clone())
}

async fn run_all(driver: &HydrationDriver, document: &Document) {
	for task in driver.island_tasks(document) {
		let _ = task.run().await;
	}
}

fn click(document: &Document, selector: &str) {
	let element = document.query_selector(selector).unwrap();
	element
		.inner()
		.clone()
		.dyn_into::<web_sys::HtmlElement>()
		.unwrap()
		.click();
}

fn text_of(document: &Document, selector: &str) -> String {
	document.query_selector(selector).unwrap().text_content()
}

#[wasm_bindgen_test]
async fn counter_hydrates_and_counts_five_six_four() {
	let document = page_with(&counter_markup(5));
	let driver = driver_with(&HydrationMetrics::new());

	run_all(&driver, &document).await;

	assert_eq!(text_of(&document, ".count-value"), "5");

	click(&document, "[aria-label=\"Increment counter\"]");
	assert_eq!(text_of(&document, ".count-value"), "6");

	click(&document, "[aria-label=\"Decrement counter\"]");
	click(&document, "[aria-label=\"Decrement counter\"]");
	assert_eq!(text_of(&document, ".count-value"), "4");
}

#[wasm_bindgen_test]
async fn double_invocation_does_not_double_hydrate() {
	let document = page_with(&counter_markup(5));
	let metrics = HydrationMetrics::new();
	let driver = driver_with(&metrics);

	run_all(&driver, &document).await;
	run_all(&driver, &document).await;

	assert_eq!(driver.hydrated_count(), 1);
	assert_eq!(metrics.components_hydrated(), 1);

	// Doubled handlers would increment twice per click.
	click(&document, "[aria-label=\"Increment counter\"]");
	assert_eq!(text_of(&document, ".count-value"), "6");
}

#[wasm_bindgen_test]
async fn unknown_component_leaves_siblings_interactive() {
	let body = format!(
		"{}<div data-island data-component=\"Foo\"><p>static</p></div>",
		counter_markup(0)
	);
	let document = page_with(&body);
	let metrics = HydrationMetrics::new();
	let driver = driver_with(&metrics);

	run_all(&driver, &document).await;

	assert_eq!(metrics.components_hydrated(), 1);
	assert!(metrics.errors() >= 1);

	// The counter still works.
	click(&document, "[aria-label=\"Increment counter\"]");
	assert_eq!(text_of(&document, ".count-value"), "1");

	// The unknown island kept its static markup, with no fallback.
	let foreign = document
		.query_selector("[data-component=\"Foo\"]")
		.unwrap();
	assert_eq!(foreign.inner().inner_html(), "<p>static</p>");
}

#[wasm_bindgen_test]
async fn malformed_props_hydrate_with_empty_bag() {
	let inner = Counter::new(9).render().render_to_string();
	let body = format!(
		"<div data-island data-component=\"Counter\" data-props='{{oops'>{inner}</div>"
	);
	let document = page_with(&body);
	let metrics = HydrationMetrics::new();
	let driver = driver_with(&metrics);

	run_all(&driver, &document).await;

	// Empty bag: the counter starts at the default, not the server's 9.
	assert_eq!(metrics.components_hydrated(), 1);
	assert_eq!(text_of(&document, ".count-value"), "0");
}

#[wasm_bindgen_test]
async fn user_profile_shows_loading_then_mocked_record() {
	let document = page_with(&profile_markup("u1"));
	let driver = driver_with(&HydrationMetrics::new());

	run_all(&driver, &document).await;

	// Binding leaves the loading indicator up until the fetch resolves.
	assert!(
		text_of(&document, "[data-component=\"UserProfile\"]").contains("Loading user profile")
	);

	TimeoutFuture::new(600).await;

	let text = text_of(&document, "[data-component=\"UserProfile\"]");
	assert!(text.contains("John Doe"));
	assert!(text.contains("john@example.com"));
	assert!(text.contains("Developer"));
	assert!(text.contains("2023-01-01"));
}

#[wasm_bindgen_test]
async fn user_profile_failure_trips_boundary_once() {
	let document = page_with(&profile_markup(""));
	let metrics = HydrationMetrics::new();
	let driver = driver_with(&metrics);

	run_all(&driver, &document).await;
	TimeoutFuture::new(600).await;

	assert_eq!(metrics.errors(), 1);
	let fallback = document.query_selector(".island-error").unwrap();
	assert_eq!(fallback.get_attribute("role").as_deref(), Some("alert"));
	assert!(
		fallback
			.text_content()
			.contains("Something went wrong loading this component.")
	);
}
