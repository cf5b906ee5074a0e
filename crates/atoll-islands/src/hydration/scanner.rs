//! Island detection.
//!
//! The scanner finds every element carrying the `data-island` marker in
//! the document at scan time and extracts its component name and property
//! bag. Re-scanning after dynamic content insertion is an explicit
//! operation: call [`IslandScanner::scan`] again; the scanner never
//! observes mutations on its own.

use serde_json::Value;

use crate::dom::{Document, Element};
use crate::error::HydrateError;
use crate::warn_log;

/// Marker attribute identifying an island element.
pub const ISLAND_ATTR: &str = "data-island";
/// Attribute naming the registry entry to hydrate with.
pub const COMPONENT_ATTR: &str = "data-component";
/// Attribute holding the JSON-serialized property bag.
pub const PROPS_ATTR: &str = "data-props";

/// One island found in the document: its component name, parsed property
/// bag, and the marker element itself.
///
/// Descriptors are created at scan time and consumed once by the
/// hydration driver; only the element's hydrated status outlives them.
#[derive(Debug, Clone)]
pub struct IslandDescriptor {
	/// The component name from `data-component`.
	pub component: String,
	/// The parsed property bag; `{}` when absent or malformed.
	pub props: Value,
	/// The marker element.
	pub element: Element,
}

/// Finds island elements in a document.
pub struct IslandScanner {
	document: Document,
}

impl IslandScanner {
	/// Creates a scanner over the given document.
	pub fn new(document: Document) -> Self {
		Self { document }
	}

	/// Returns one descriptor per marked element present right now.
	///
	/// Elements missing a `data-component` name are skipped with a
	/// warning; malformed `data-props` fall back to the empty bag. A
	/// single broken island never blocks the rest of the scan.
	pub fn scan(&self) -> Vec<IslandDescriptor> {
		self.document
			.query_selector_all(&format!("[{ISLAND_ATTR}]"))
			.iter()
			.filter_map(Self::describe)
			.collect()
	}

	/// Builds a descriptor for a single marked element.
	///
	/// Also used by the standalone-mount entry points, which target one
	/// element directly instead of scanning.
	pub fn describe(element: &Element) -> Option<IslandDescriptor> {
		let Some(component) = element.get_attribute(COMPONENT_ATTR) else {
			warn_log!("island element has no {} attribute, skipping", COMPONENT_ATTR);
			return None;
		};

		let props = parse_props_attr(&component, element);
		Some(IslandDescriptor {
			component,
			props,
			element: element.clone(),
		})
	}
}

/// Parses `data-props`, falling back to the empty bag on any problem.
fn parse_props_attr(component: &str, element: &Element) -> Value {
	let empty = || Value::Object(serde_json::Map::new());

	let Some(raw) = element.get_attribute(PROPS_ATTR) else {
		return empty();
	};

	match serde_json::from_str::<Value>(&raw) {
		Ok(value @ Value::Object(_)) => value,
		Ok(other) => {
			let error = HydrateError::PropsParse {
				component: component.to_string(),
				message: format!("expected a JSON object, found {other}"),
			};
			warn_log!("{error}");
			empty()
		}
		Err(err) => {
			let error = HydrateError::PropsParse {
				component: component.to_string(),
				message: err.to_string(),
			};
			warn_log!("{error}");
			empty()
		}
	}
}
