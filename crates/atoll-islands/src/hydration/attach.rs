//! Binding view event handlers onto existing server-rendered markup.
//!
//! Hydration never rebuilds the subtree: the island's rendered view is
//! walked against the DOM children already under the marker element, and
//! each view element is paired positionally with its server-rendered
//! counterpart. Text views consume no DOM slot (element children only are
//! paired), so server-side whitespace does not shift the pairing.

use super::IslandContext;
use crate::component::{ElementView, View};
use crate::dom::Element;
use crate::error::HydrateError;

/// Attaches the view's event handlers onto the existing markup under
/// `root`.
///
/// `root` is the island's marker element; the view describes the component
/// markup that the server rendered *inside* it. Fails with
/// [`HydrateError::HydrationFailure`] when the markup does not structurally
/// match the view (missing elements or diverging tags); a mismatched
/// island must not end up half-interactive.
pub fn attach_handlers(
	root: &Element,
	view: &View,
	ctx: &IslandContext,
) -> Result<(), HydrateError> {
	let children = root.children();
	let mut cursor = 0;
	attach_into(&children, view, &mut cursor, ctx)
}

fn attach_into(
	dom_children: &[Element],
	view: &View,
	cursor: &mut usize,
	ctx: &IslandContext,
) -> Result<(), HydrateError> {
	match view {
		View::Element(el_view) => {
			let Some(element) = dom_children.get(*cursor) else {
				return Err(HydrateError::failure(
					ctx.name(),
					format!(
						"server markup is missing a <{}> element",
						el_view.tag_name()
					),
				));
			};
			*cursor += 1;
			attach_element(element, el_view, ctx)
		}
		View::Fragment(views) => {
			for child in views {
				attach_into(dom_children, child, cursor, ctx)?;
			}
			Ok(())
		}
		View::Text(_) | View::Empty => Ok(()),
	}
}

fn attach_element(
	element: &Element,
	view: &ElementView,
	ctx: &IslandContext,
) -> Result<(), HydrateError> {
	if element.tag() != view.tag_name() {
		return Err(HydrateError::failure(
			ctx.name(),
			format!(
				"server markup mismatch: expected <{}>, found <{}>",
				view.tag_name(),
				element.tag()
			),
		));
	}

	for (event_type, handler) in view.event_handlers() {
		let handler = handler.clone();
		let handle = element
			.add_event_listener(event_type, move |event| handler(event))
			.map_err(|err| HydrateError::failure(ctx.name(), err))?;
		ctx.retain(handle);
	}

	let children = element.children();
	let mut cursor = 0;
	for child_view in view.child_views() {
		attach_into(&children, child_view, &mut cursor, ctx)?;
	}
	Ok(())
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::component::IntoView;
	use crate::dom::{Document, EventType};
	use crate::event_handler;
	use crate::metrics::HydrationMetrics;
	use std::cell::Cell;
	use std::rc::Rc;

	fn context(root: &Element) -> IslandContext {
		IslandContext::for_tests("Test", root, HydrationMetrics::new())
	}

	#[test]
	fn test_attach_pairs_nested_elements() {
		let fired = Rc::new(Cell::new(false));
		let fired_clone = fired.clone();
		let view = ElementView::new("div")
			.child("label: ")
			.child(
				ElementView::new("button")
					.on(EventType::Click, event_handler(move |_| fired_clone.set(true)))
					.child("go"),
			)
			.into_view();

		let document = Document::new();
		let root = Element::new("div");
		view.mount(&root, &document).unwrap();

		let ctx = context(&root);
		attach_handlers(&root, &view, &ctx).unwrap();

		let button = root.children()[0].children()[0].clone();
		assert_eq!(button.tag(), "button");
		button.dispatch(&EventType::Click);
		assert!(fired.get());
	}

	#[test]
	fn test_text_views_consume_no_dom_slot() {
		// Fragment of [text, element]: the element must pair with the
		// first DOM child even though the text view precedes it.
		let view = View::fragment(vec![
			View::text("leading"),
			ElementView::new("span").into_view(),
		]);

		let root = Element::new("div");
		root.append_text("leading").unwrap();
		root.append_child(&Element::new("span")).unwrap();

		let ctx = context(&root);
		assert!(attach_handlers(&root, &view, &ctx).is_ok());
	}

	#[test]
	fn test_missing_element_is_an_error() {
		let view = ElementView::new("button").into_view();
		let root = Element::new("div");

		let ctx = context(&root);
		let err = attach_handlers(&root, &view, &ctx).unwrap_err();
		assert!(err.to_string().contains("missing a <button>"));
	}

	#[test]
	fn test_tag_mismatch_is_an_error() {
		let view = ElementView::new("button").into_view();
		let root = Element::new("div");
		root.append_child(&Element::new("span")).unwrap();

		let ctx = context(&root);
		let err = attach_handlers(&root, &view, &ctx).unwrap_err();
		assert!(err.to_string().contains("expected <button>"));
	}
}
