//! DOM abstraction layer.
//!
//! On `wasm32` targets [`Element`] and [`Document`] are thin wrappers over
//! `web-sys`. On native targets they are backed by a functional in-memory
//! element tree (attribute map, child list, listener list, and a small
//! selector matcher), so the scanner, driver, and islands run under plain
//! `cargo test` with no browser.
//!
//! The selector matcher on the native side covers exactly the query shapes
//! this crate uses: `tag`, `.class`, `[attr]`, and `[attr="value"]`.

use std::fmt;

/// The event value passed to handlers on WASM targets.
#[cfg(target_arch = "wasm32")]
pub type Event = web_sys::Event;

/// The event value passed to handlers on native targets.
#[cfg(not(target_arch = "wasm32"))]
pub type Event = DummyEvent;

/// Placeholder event for native targets; carries no payload.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyEvent;

/// Error raised by DOM operations.
#[derive(Debug, Clone)]
pub struct DomError(String);

impl DomError {
	/// Creates a new DOM error with the given description.
	pub fn new(message: impl Into<String>) -> Self {
		Self(message.into())
	}
}

impl fmt::Display for DomError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl std::error::Error for DomError {}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DomError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		Self(format!("{value:?}"))
	}
}

/// DOM event types this crate attaches handlers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
	/// `click`
	Click,
	/// `dblclick`
	DblClick,
	/// `input`
	Input,
	/// `change`
	Change,
	/// `submit`
	Submit,
	/// `focus`
	Focus,
	/// `blur`
	Blur,
	/// `keydown`
	KeyDown,
	/// `keyup`
	KeyUp,
	/// `mouseenter`
	MouseEnter,
	/// `mouseleave`
	MouseLeave,
}

impl EventType {
	/// Returns the DOM event name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Click => "click",
			Self::DblClick => "dblclick",
			Self::Input => "input",
			Self::Change => "change",
			Self::Submit => "submit",
			Self::Focus => "focus",
			Self::Blur => "blur",
			Self::KeyDown => "keydown",
			Self::KeyUp => "keyup",
			Self::MouseEnter => "mouseenter",
			Self::MouseLeave => "mouseleave",
		}
	}
}

#[cfg(target_arch = "wasm32")]
mod platform {
	use super::{DomError, EventType};
	use wasm_bindgen::JsCast;
	use wasm_bindgen::closure::Closure;

	/// A DOM element handle.
	#[derive(Clone)]
	pub struct Element {
		inner: web_sys::Element,
	}

	/// Keeps an attached event listener's closure alive.
	///
	/// Dropping the handle invalidates the listener, so the hydration
	/// keepalive store retains handles for the page's lifetime.
	pub struct EventHandle {
		_closure: Closure<dyn FnMut(web_sys::Event)>,
	}

	impl std::fmt::Debug for EventHandle {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.debug_struct("EventHandle").finish()
		}
	}

	impl Element {
		/// Wraps a `web_sys` element.
		pub fn new(inner: web_sys::Element) -> Self {
			Self { inner }
		}

		/// Returns the wrapped `web_sys` element.
		pub fn inner(&self) -> &web_sys::Element {
			&self.inner
		}

		/// Returns the lowercase tag name.
		pub fn tag(&self) -> String {
			self.inner.tag_name().to_lowercase()
		}

		/// Returns an attribute value.
		pub fn get_attribute(&self, name: &str) -> Option<String> {
			self.inner.get_attribute(name)
		}

		/// Sets an attribute value.
		pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
			self.inner.set_attribute(name, value).map_err(DomError::from)
		}

		/// Returns the element children, in document order.
		pub fn children(&self) -> Vec<Element> {
			let collection = self.inner.children();
			(0..collection.length())
				.filter_map(|i| collection.item(i))
				.map(Element::new)
				.collect()
		}

		/// Appends a child element.
		pub fn append_child(&self, child: &Element) -> Result<(), DomError> {
			self.inner
				.append_child(child.inner())
				.map(|_| ())
				.map_err(DomError::from)
		}

		/// Appends a text node.
		pub fn append_text(&self, text: &str) -> Result<(), DomError> {
			let document = self
				.inner
				.owner_document()
				.ok_or_else(|| DomError::new("element has no owner document"))?;
			let node = document.create_text_node(text);
			self.inner
				.append_child(&node)
				.map(|_| ())
				.map_err(DomError::from)
		}

		/// Returns the concatenated text content of the subtree.
		pub fn text_content(&self) -> String {
			self.inner.text_content().unwrap_or_default()
		}

		/// Replaces the subtree's content with a single text node.
		pub fn set_text_content(&self, text: &str) {
			self.inner.set_text_content(Some(text));
		}

		/// Removes all children (elements and text).
		pub fn clear_children(&self) {
			self.inner.set_inner_html("");
		}

		/// Returns the first descendant matching the selector.
		pub fn query_selector(&self, selector: &str) -> Option<Element> {
			self.inner
				.query_selector(selector)
				.ok()
				.flatten()
				.map(Element::new)
		}

		/// Returns whether `other` is this element or a descendant of it.
		pub fn contains(&self, other: &Element) -> bool {
			let node: &web_sys::Node = other.inner().as_ref();
			self.inner.contains(Some(node))
		}

		/// Returns whether both handles refer to the same DOM node.
		pub fn same_as(&self, other: &Element) -> bool {
			let node: &web_sys::Node = other.inner().as_ref();
			self.inner.is_same_node(Some(node))
		}

		/// Attaches an event listener; the returned handle keeps it alive.
		pub fn add_event_listener(
			&self,
			event_type: &EventType,
			f: impl Fn(web_sys::Event) + 'static,
		) -> Result<EventHandle, DomError> {
			let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
			self.inner
				.add_event_listener_with_callback(
					event_type.as_str(),
					closure.as_ref().unchecked_ref(),
				)
				.map_err(DomError::from)?;
			Ok(EventHandle { _closure: closure })
		}
	}

	impl std::fmt::Debug for Element {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.debug_struct("Element").field("tag", &self.tag()).finish()
		}
	}

	/// A DOM document handle.
	#[derive(Clone)]
	pub struct Document {
		inner: web_sys::Document,
	}

	impl Document {
		/// Wraps a `web_sys` document.
		pub fn new(inner: web_sys::Document) -> Self {
			Self { inner }
		}

		/// Returns the wrapped `web_sys` document.
		pub fn inner(&self) -> &web_sys::Document {
			&self.inner
		}

		/// Creates a detached element.
		pub fn create_element(&self, tag: &str) -> Result<Element, DomError> {
			self.inner
				.create_element(tag)
				.map(Element::new)
				.map_err(DomError::from)
		}

		/// Returns the first element matching the selector.
		pub fn query_selector(&self, selector: &str) -> Option<Element> {
			self.inner
				.query_selector(selector)
				.ok()
				.flatten()
				.map(Element::new)
		}

		/// Returns every element matching the selector, in document order.
		pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
			let Ok(node_list) = self.inner.query_selector_all(selector) else {
				return Vec::new();
			};
			(0..node_list.length())
				.filter_map(|i| node_list.item(i))
				.filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
				.map(Element::new)
				.collect()
		}
	}

	impl std::fmt::Debug for Document {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.debug_struct("Document").finish()
		}
	}

	/// Returns the current page's document.
	///
	/// # Panics
	///
	/// Panics when no window/document is available; this helper is for
	/// browser entry points, which cannot run without one.
	pub fn document() -> Document {
		let window = web_sys::window().expect("no window available");
		let document = window.document().expect("window has no document");
		Document::new(document)
	}
}

#[cfg(not(target_arch = "wasm32"))]
mod platform {
	use super::{DomError, DummyEvent, EventType};
	use std::cell::RefCell;
	use std::collections::BTreeMap;
	use std::rc::Rc;

	type Listener = Rc<dyn Fn(DummyEvent)>;

	enum MockNode {
		Element(Element),
		Text(String),
	}

	struct ElementInner {
		tag: String,
		attrs: RefCell<BTreeMap<String, String>>,
		nodes: RefCell<Vec<MockNode>>,
		listeners: RefCell<Vec<(EventType, Listener)>>,
	}

	/// An in-memory element used on native targets.
	#[derive(Clone)]
	pub struct Element {
		inner: Rc<ElementInner>,
	}

	/// Listener keepalive handle. The native listener is stored on the
	/// element itself, so this is an inert token with the same shape as
	/// the WASM handle.
	#[derive(Debug)]
	pub struct EventHandle;

	impl Element {
		/// Creates a detached in-memory element.
		pub fn new(tag: &str) -> Self {
			Self {
				inner: Rc::new(ElementInner {
					tag: tag.to_lowercase(),
					attrs: RefCell::new(BTreeMap::new()),
					nodes: RefCell::new(Vec::new()),
					listeners: RefCell::new(Vec::new()),
				}),
			}
		}

		/// Returns the lowercase tag name.
		pub fn tag(&self) -> String {
			self.inner.tag.clone()
		}

		/// Returns an attribute value.
		pub fn get_attribute(&self, name: &str) -> Option<String> {
			self.inner.attrs.borrow().get(name).cloned()
		}

		/// Sets an attribute value.
		pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
			self.inner
				.attrs
				.borrow_mut()
				.insert(name.to_string(), value.to_string());
			Ok(())
		}

		/// Returns the element children, in document order.
		pub fn children(&self) -> Vec<Element> {
			self.inner
				.nodes
				.borrow()
				.iter()
				.filter_map(|node| match node {
					MockNode::Element(el) => Some(el.clone()),
					MockNode::Text(_) => None,
				})
				.collect()
		}

		/// Appends a child element.
		pub fn append_child(&self, child: &Element) -> Result<(), DomError> {
			self.inner
				.nodes
				.borrow_mut()
				.push(MockNode::Element(child.clone()));
			Ok(())
		}

		/// Appends a text node.
		pub fn append_text(&self, text: &str) -> Result<(), DomError> {
			self.inner
				.nodes
				.borrow_mut()
				.push(MockNode::Text(text.to_string()));
			Ok(())
		}

		/// Returns the concatenated text content of the subtree.
		pub fn text_content(&self) -> String {
			let mut out = String::new();
			for node in self.inner.nodes.borrow().iter() {
				match node {
					MockNode::Element(el) => out.push_str(&el.text_content()),
					MockNode::Text(text) => out.push_str(text),
				}
			}
			out
		}

		/// Replaces the subtree's content with a single text node.
		pub fn set_text_content(&self, text: &str) {
			let mut nodes = self.inner.nodes.borrow_mut();
			nodes.clear();
			nodes.push(MockNode::Text(text.to_string()));
		}

		/// Removes all children (elements and text).
		pub fn clear_children(&self) {
			self.inner.nodes.borrow_mut().clear();
		}

		/// Returns the first descendant matching the selector.
		pub fn query_selector(&self, selector: &str) -> Option<Element> {
			let matcher = Selector::parse(selector)?;
			self.find_first(&matcher)
		}

		/// Returns whether `other` is this element or a descendant of it.
		pub fn contains(&self, other: &Element) -> bool {
			if self.same_as(other) {
				return true;
			}
			self.children().iter().any(|child| child.contains(other))
		}

		/// Returns whether both handles refer to the same node.
		pub fn same_as(&self, other: &Element) -> bool {
			Rc::ptr_eq(&self.inner, &other.inner)
		}

		/// Attaches an event listener.
		pub fn add_event_listener(
			&self,
			event_type: &EventType,
			f: impl Fn(DummyEvent) + 'static,
		) -> Result<EventHandle, DomError> {
			self.inner
				.listeners
				.borrow_mut()
				.push((*event_type, Rc::new(f)));
			Ok(EventHandle)
		}

		/// Fires every listener registered for the event type.
		///
		/// Test helper standing in for real browser event dispatch.
		pub fn dispatch(&self, event_type: &EventType) {
			let listeners: Vec<Listener> = self
				.inner
				.listeners
				.borrow()
				.iter()
				.filter(|(registered, _)| registered == event_type)
				.map(|(_, listener)| listener.clone())
				.collect();
			for listener in listeners {
				listener(DummyEvent);
			}
		}

		/// Returns the number of listeners registered for the event type.
		pub fn listener_count(&self, event_type: &EventType) -> usize {
			self.inner
				.listeners
				.borrow()
				.iter()
				.filter(|(registered, _)| registered == event_type)
				.count()
		}

		fn matches(&self, selector: &Selector) -> bool {
			match selector {
				Selector::Tag(tag) => self.inner.tag == *tag,
				Selector::Class(class) => self
					.get_attribute("class")
					.is_some_and(|value| value.split_whitespace().any(|c| c == class)),
				Selector::AttrPresent(name) => self.inner.attrs.borrow().contains_key(name),
				Selector::AttrEquals(name, value) => {
					self.get_attribute(name).as_deref() == Some(value.as_str())
				}
			}
		}

		fn find_first(&self, selector: &Selector) -> Option<Element> {
			for child in self.children() {
				if child.matches(selector) {
					return Some(child);
				}
				if let Some(found) = child.find_first(selector) {
					return Some(found);
				}
			}
			None
		}

		fn collect_matches(&self, selector: &Selector, out: &mut Vec<Element>) {
			for child in self.children() {
				if child.matches(selector) {
					out.push(child.clone());
				}
				child.collect_matches(selector, out);
			}
		}
	}

	impl std::fmt::Debug for Element {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.debug_struct("Element")
				.field("tag", &self.inner.tag)
				.field("attrs", &*self.inner.attrs.borrow())
				.finish()
		}
	}

	/// The query shapes the native matcher understands.
	enum Selector {
		Tag(String),
		Class(String),
		AttrPresent(String),
		AttrEquals(String, String),
	}

	impl Selector {
		fn parse(selector: &str) -> Option<Self> {
			let selector = selector.trim();
			if let Some(rest) = selector.strip_prefix('[') {
				let body = rest.strip_suffix(']')?;
				if let Some((name, value)) = body.split_once('=') {
					let value = value.trim_matches(|c| c == '"' || c == '\'');
					return Some(Self::AttrEquals(name.to_string(), value.to_string()));
				}
				return Some(Self::AttrPresent(body.to_string()));
			}
			if let Some(class) = selector.strip_prefix('.') {
				return Some(Self::Class(class.to_string()));
			}
			if selector.is_empty() {
				return None;
			}
			Some(Self::Tag(selector.to_lowercase()))
		}
	}

	/// An in-memory document: a list of root elements.
	#[derive(Clone, Default)]
	pub struct Document {
		roots: Rc<RefCell<Vec<Element>>>,
	}

	impl Document {
		/// Creates an empty in-memory document.
		pub fn new() -> Self {
			Self::default()
		}

		/// Appends a root element to the document.
		pub fn append_root(&self, element: &Element) {
			self.roots.borrow_mut().push(element.clone());
		}

		/// Creates a detached element.
		pub fn create_element(&self, tag: &str) -> Result<Element, DomError> {
			Ok(Element::new(tag))
		}

		/// Returns the first element matching the selector.
		pub fn query_selector(&self, selector: &str) -> Option<Element> {
			self.query_selector_all(selector).into_iter().next()
		}

		/// Returns every element matching the selector, in document order.
		pub fn query_selector_all(&self, selector: &str) -> Vec<Element> {
			let Some(matcher) = Selector::parse(selector) else {
				return Vec::new();
			};
			let mut out = Vec::new();
			for root in self.roots.borrow().iter() {
				if root.matches(&matcher) {
					out.push(root.clone());
				}
				root.collect_matches(&matcher, &mut out);
			}
			out
		}
	}

	impl std::fmt::Debug for Document {
		fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
			f.debug_struct("Document")
				.field("roots", &self.roots.borrow().len())
				.finish()
		}
	}

	/// Returns an empty in-memory document.
	///
	/// Native counterpart of the browser entry point helper; tests build
	/// their own documents with [`Document::new`] and
	/// [`Document::append_root`].
	pub fn document() -> Document {
		Document::new()
	}
}

pub use platform::{Document, Element, EventHandle, document};

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use std::cell::Cell;
	use std::rc::Rc;

	fn island(component: &str) -> Element {
		let el = Element::new("div");
		el.set_attribute("data-island", "").unwrap();
		el.set_attribute("data-component", component).unwrap();
		el
	}

	#[test]
	fn test_attributes_roundtrip() {
		let el = Element::new("div");
		assert_eq!(el.get_attribute("class"), None);
		el.set_attribute("class", "island-component").unwrap();
		assert_eq!(
			el.get_attribute("class").as_deref(),
			Some("island-component")
		);
	}

	#[test]
	fn test_children_skip_text_nodes() {
		let parent = Element::new("div");
		parent.append_text("before").unwrap();
		parent.append_child(&Element::new("span")).unwrap();
		parent.append_text("after").unwrap();

		let children = parent.children();
		assert_eq!(children.len(), 1);
		assert_eq!(children[0].tag(), "span");
		assert_eq!(parent.text_content(), "beforeafter");
	}

	#[test]
	fn test_set_text_content_replaces_subtree() {
		let parent = Element::new("p");
		parent.append_child(&Element::new("span")).unwrap();
		parent.set_text_content("5");
		assert!(parent.children().is_empty());
		assert_eq!(parent.text_content(), "5");
	}

	#[test]
	fn test_query_selector_attr_present() {
		let doc = Document::new();
		let root = Element::new("main");
		root.append_child(&island("Counter")).unwrap();
		root.append_child(&island("UserProfile")).unwrap();
		doc.append_root(&root);

		let found = doc.query_selector_all("[data-island]");
		assert_eq!(found.len(), 2);
	}

	#[test]
	fn test_query_selector_attr_equals() {
		let doc = Document::new();
		let root = Element::new("main");
		root.append_child(&island("Counter")).unwrap();
		root.append_child(&island("UserProfile")).unwrap();
		doc.append_root(&root);

		let found = doc.query_selector("[data-component=\"UserProfile\"]");
		assert_eq!(
			found.unwrap().get_attribute("data-component").as_deref(),
			Some("UserProfile")
		);
	}

	#[test]
	fn test_query_selector_class() {
		let parent = Element::new("div");
		let span = Element::new("span");
		span.set_attribute("class", "count-value highlighted").unwrap();
		parent.append_child(&span).unwrap();

		let found = parent.query_selector(".count-value").unwrap();
		assert!(found.same_as(&span));
	}

	#[test]
	fn test_same_as_is_identity() {
		let a = Element::new("div");
		let b = Element::new("div");
		assert!(a.same_as(&a.clone()));
		assert!(!a.same_as(&b));
	}

	#[test]
	fn test_contains() {
		let outer = Element::new("div");
		let inner = Element::new("span");
		outer.append_child(&inner).unwrap();

		assert!(outer.contains(&inner));
		assert!(!inner.contains(&outer));
	}

	#[test]
	fn test_dispatch_fires_matching_listeners() {
		let el = Element::new("button");
		let clicks = Rc::new(Cell::new(0));

		let clicks_clone = clicks.clone();
		el.add_event_listener(&EventType::Click, move |_| {
			clicks_clone.set(clicks_clone.get() + 1);
		})
		.unwrap();

		el.dispatch(&EventType::Click);
		el.dispatch(&EventType::Click);
		el.dispatch(&EventType::Input);
		assert_eq!(clicks.get(), 2);
	}
}
