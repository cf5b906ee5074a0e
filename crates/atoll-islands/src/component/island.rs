//! Island trait definition.

use crate::component::View;
use crate::dom::Element;
use crate::error::HydrateError;
use crate::hydration::{IslandContext, attach_handlers};

/// Trait for hydratable island components.
///
/// An island describes its markup with [`render`](Island::render) and
/// binds interactive behavior onto the *existing* server-rendered subtree
/// with [`bind`](Island::bind). The default `bind` walks the rendered view
/// against the markup already inside the island element and attaches the
/// view's event handlers in place; components with reactive state override
/// it to also install effects.
///
/// # Example
///
/// ```ignore
/// use atoll_islands::component::{ElementView, Island, IntoView, View};
///
/// struct Badge {
///     label: String,
/// }
///
/// impl Island for Badge {
///     fn render(&self) -> View {
///         ElementView::new("span")
///             .attr("class", "badge")
///             .child(self.label.clone())
///             .into_view()
///     }
/// }
/// ```
pub trait Island {
	/// Describes the island's markup for the current state.
	fn render(&self) -> View;

	/// Binds interactive behavior onto the existing markup under `root`.
	///
	/// `root` is the marker element itself; the server-rendered component
	/// markup is its children. Handles and effects that must survive the
	/// call are parked with [`IslandContext::retain`].
	fn bind(&self, root: &Element, ctx: &IslandContext) -> Result<(), HydrateError> {
		attach_handlers(root, &self.render(), ctx)
	}
}

/// A boxed island for dynamic dispatch from the registry.
pub type BoxedIsland = Box<dyn Island>;
