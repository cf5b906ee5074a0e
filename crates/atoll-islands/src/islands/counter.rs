//! The counter island.

use serde::Deserialize;
use serde_json::Value;

use atoll_core::{Effect, Signal};

use crate::callback::{Callback, IntoEventHandler};
use crate::component::{ElementView, Island, IntoView, Props, View};
use crate::dom::{Element, EventType};
use crate::error::HydrateError;
use crate::hydration::{IslandContext, attach_handlers};

/// Props for [`Counter`], from `data-props='{"initialCount": n}'`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CounterProps {
	/// The count shown before any interaction.
	pub initial_count: i64,
}

impl Props for CounterProps {}

/// An interactive counter bound to server-rendered markup.
///
/// The count lives in a [`Signal`]; the increment/decrement buttons share
/// cloneable [`Callback`] handlers over it, and an [`Effect`] keeps the
/// existing `.count-value` text node in sync.
pub struct Counter {
	count: Signal<i64>,
}

impl Counter {
	/// Creates a counter starting at the given value.
	pub fn new(initial_count: i64) -> Self {
		Self {
			count: Signal::new(initial_count),
		}
	}

	/// Creates a counter from a parsed property bag.
	pub fn from_props(props: &Value) -> Self {
		Self::new(CounterProps::from_value(props).initial_count)
	}

	/// Returns the current count.
	pub fn count(&self) -> i64 {
		self.count.get_untracked()
	}
}

impl Island for Counter {
	fn render(&self) -> View {
		let decrement = Callback::new({
			let count = self.count.clone();
			move |_| count.update(|n| *n -= 1)
		});
		let increment = Callback::new({
			let count = self.count.clone();
			move |_| count.update(|n| *n += 1)
		});

		ElementView::new("div")
			.attr("class", "island-component counter")
			.attr("role", "region")
			.attr("aria-label", "Counter")
			.child(
				ElementView::new("h3")
					.attr("id", "counter-heading")
					.child("Interactive Counter"),
			)
			.child(
				ElementView::new("p")
					.attr("aria-live", "polite")
					.attr("aria-atomic", "true")
					.child("Count: ")
					.child(
						ElementView::new("span")
							.attr("class", "count-value")
							.child(self.count.get_untracked().to_string()),
					),
			)
			.child(
				ElementView::new("div")
					.attr("class", "button-group")
					.child(
						ElementView::new("button")
							.attr("class", "counter-button")
							.attr("aria-label", "Decrement counter")
							.on(EventType::Click, decrement.into_event_handler())
							.child("Decrement"),
					)
					.child(
						ElementView::new("button")
							.attr("class", "counter-button")
							.attr("aria-label", "Increment counter")
							.on(EventType::Click, increment.into_event_handler())
							.child("Increment"),
					),
			)
			.into_view()
	}

	fn bind(&self, root: &Element, ctx: &IslandContext) -> Result<(), HydrateError> {
		attach_handlers(root, &self.render(), ctx)?;

		let value = root.query_selector(".count-value").ok_or_else(|| {
			HydrateError::failure(ctx.name(), "count display (.count-value) not found in markup")
		})?;

		let count = self.count.clone();
		let effect = Effect::new(move || {
			value.set_text_content(&count.get().to_string());
		});
		ctx.retain(effect);

		Ok(())
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::dom::Document;
	use crate::metrics::HydrationMetrics;
	use serde_json::json;

	fn prerendered(counter: &Counter) -> Element {
		let root = Element::new("div");
		counter.render().mount(&root, &Document::new()).unwrap();
		root
	}

	fn buttons(root: &Element) -> (Element, Element) {
		let group = root.children()[0].children()[2].clone();
		let buttons = group.children();
		(buttons[0].clone(), buttons[1].clone())
	}

	#[test]
	fn test_props_default_to_zero() {
		let counter = Counter::from_props(&json!({}));
		assert_eq!(counter.count(), 0);
	}

	#[test]
	fn test_props_initial_count() {
		let counter = Counter::from_props(&json!({"initialCount": 5}));
		assert_eq!(counter.count(), 5);
	}

	#[test]
	fn test_render_markup() {
		let counter = Counter::new(5);
		let html = counter.render().render_to_string();

		assert!(html.contains("class=\"island-component counter\""));
		assert!(html.contains("role=\"region\""));
		assert!(html.contains("aria-live=\"polite\""));
		assert!(html.contains("<span class=\"count-value\">5</span>"));
		assert!(html.contains("aria-label=\"Decrement counter\""));
		assert!(html.contains("aria-label=\"Increment counter\""));
	}

	#[test]
	fn test_bind_shows_initial_count() {
		let counter = Counter::from_props(&json!({"initialCount": 5}));
		let root = prerendered(&counter);

		let ctx = IslandContext::for_tests("Counter", &root, HydrationMetrics::new());
		counter.bind(&root, &ctx).unwrap();

		let value = root.query_selector(".count-value").unwrap();
		assert_eq!(value.text_content(), "5");
	}

	#[test]
	fn test_click_increment_then_decrement_twice() {
		let counter = Counter::from_props(&json!({"initialCount": 5}));
		let root = prerendered(&counter);

		let ctx = IslandContext::for_tests("Counter", &root, HydrationMetrics::new());
		counter.bind(&root, &ctx).unwrap();

		let value = root.query_selector(".count-value").unwrap();
		let (decrement, increment) = buttons(&root);

		increment.dispatch(&EventType::Click);
		assert_eq!(value.text_content(), "6");

		decrement.dispatch(&EventType::Click);
		decrement.dispatch(&EventType::Click);
		assert_eq!(value.text_content(), "4");
		assert_eq!(counter.count(), 4);
	}

	#[test]
	fn test_bind_without_count_value_fails() {
		let counter = Counter::new(0);
		let root = Element::new("div");
		// Markup with the right shape but no .count-value span.
		let bare = Counter::new(0).render();
		bare.mount(&root, &Document::new()).unwrap();
		let span = root.query_selector(".count-value").unwrap();
		span.set_attribute("class", "other").unwrap();

		let ctx = IslandContext::for_tests("Counter", &root, HydrationMetrics::new());
		assert!(counter.bind(&root, &ctx).is_err());
	}
}
