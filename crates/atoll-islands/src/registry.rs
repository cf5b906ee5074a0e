//! Component registry: island names to factories.
//!
//! The registry is the tagged-variant factory behind `data-component`:
//! each name maps to a factory that builds the island from its property
//! bag, and an unregistered name fails loudly with
//! [`HydrateError::UnknownComponent`] instead of silently doing nothing.

use std::cell::OnceCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::component::BoxedIsland;
use crate::error::HydrateError;
use crate::islands::{Counter, UserProfile};

/// Builds an island instance from its parsed property bag.
pub type IslandFactory = Rc<dyn Fn(&Value) -> BoxedIsland>;

type FactoryLoader = Box<dyn Fn() -> IslandFactory>;

enum RegistryEntry {
	/// Factory available immediately.
	Eager(IslandFactory),
	/// Factory built on first resolution and cached after, so repeated
	/// resolution reuses the loaded entry.
	Deferred {
		loader: FactoryLoader,
		cached: OnceCell<IslandFactory>,
	},
}

impl RegistryEntry {
	fn factory(&self) -> IslandFactory {
		match self {
			Self::Eager(factory) => Rc::clone(factory),
			Self::Deferred { loader, cached } => Rc::clone(cached.get_or_init(loader)),
		}
	}

	fn is_loaded(&self) -> bool {
		match self {
			Self::Eager(_) => true,
			Self::Deferred { cached, .. } => cached.get().is_some(),
		}
	}
}

/// Static mapping from island names to loaders.
///
/// # Example
///
/// ```
/// use atoll_islands::registry::ComponentRegistry;
///
/// let registry = ComponentRegistry::with_builtins();
/// assert!(registry.resolve("Counter").is_ok());
/// assert!(registry.resolve("Foo").is_err());
/// ```
#[derive(Default)]
pub struct ComponentRegistry {
	entries: HashMap<String, RegistryEntry>,
}

impl ComponentRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a registry with the built-in demo islands (`Counter`,
	/// `UserProfile`) as deferred entries.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		registry.register_deferred("Counter", || {
			Rc::new(|props: &Value| Box::new(Counter::from_props(props)) as BoxedIsland)
		});
		registry.register_deferred("UserProfile", || {
			Rc::new(|props: &Value| Box::new(UserProfile::from_props(props)) as BoxedIsland)
		});
		registry
	}

	/// Registers an eagerly available factory under the given name.
	pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
	where
		F: Fn(&Value) -> BoxedIsland + 'static,
	{
		self.entries
			.insert(name.into(), RegistryEntry::Eager(Rc::new(factory)));
	}

	/// Registers a deferred entry: `loader` runs on first resolution and
	/// its result is cached for every later lookup.
	pub fn register_deferred<L>(&mut self, name: impl Into<String>, loader: L)
	where
		L: Fn() -> IslandFactory + 'static,
	{
		self.entries.insert(
			name.into(),
			RegistryEntry::Deferred {
				loader: Box::new(loader),
				cached: OnceCell::new(),
			},
		);
	}

	/// Resolves a component name to its factory.
	pub fn resolve(&self, name: &str) -> Result<IslandFactory, HydrateError> {
		self.entries
			.get(name)
			.map(RegistryEntry::factory)
			.ok_or_else(|| HydrateError::UnknownComponent(name.to_string()))
	}

	/// Returns whether a name has a registered entry.
	pub fn contains(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	/// Returns whether a deferred entry has been loaded yet.
	pub fn is_loaded(&self, name: &str) -> bool {
		self.entries
			.get(name)
			.is_some_and(RegistryEntry::is_loaded)
	}

	/// Returns the registered names, unordered.
	pub fn names(&self) -> Vec<&str> {
		self.entries.keys().map(String::as_str).collect()
	}
}

impl std::fmt::Debug for ComponentRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ComponentRegistry")
			.field("names", &self.names())
			.finish()
	}
}
