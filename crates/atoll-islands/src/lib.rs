//! Atoll Islands - Selective Hydration Client
//!
//! A page is server-rendered as static HTML containing marked placeholder
//! elements ("islands"); this crate ships the small client module that
//! finds those placeholders and binds interactive behavior onto them in
//! place, one island at a time.
//!
//! ## Marker contract
//!
//! An element participates in hydration when it carries the `data-island`
//! marker attribute, a `data-component` attribute naming a registry entry,
//! and optionally a `data-props` attribute holding a JSON object:
//!
//! ```html
//! <div data-island data-component="Counter" data-props='{"initialCount": 5}'>
//!   <!-- server-rendered counter markup -->
//! </div>
//! ```
//!
//! ## Architecture
//!
//! - [`hydration::IslandScanner`]: finds marked elements and extracts the
//!   component name and property bag
//! - [`registry::ComponentRegistry`]: maps component names to island
//!   factories (eager or deferred-and-cached)
//! - [`hydration::HydrationDriver`]: resolves, wraps, and binds each
//!   island as an independent task; failures never cross island borders
//! - [`hydration::ErrorBoundary`]: per-island one-way Healthy → Failed
//!   machine that substitutes a visible fallback
//! - [`metrics::HydrationMetrics`]: injectable monotonic counters reported
//!   once on page load
//!
//! ## Example
//!
//! ```ignore
//! use atoll_islands::hydration::HydrationDriver;
//! use atoll_islands::metrics::HydrationMetrics;
//! use atoll_islands::registry::ComponentRegistry;
//!
//! let metrics = HydrationMetrics::new();
//! let driver = HydrationDriver::new(ComponentRegistry::with_builtins(), metrics.clone());
//! driver.hydrate_document(&atoll_islands::dom::document());
//! ```
//!
//! On non-WASM targets the DOM layer is backed by a functional in-memory
//! element tree, so the whole pipeline runs under plain `cargo test`.

#![warn(missing_docs)]

pub mod callback;
pub mod component;
pub mod dom;
pub mod error;
pub mod hydration;
pub mod islands;
pub mod launcher;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod spawn;

pub use atoll_core::{Effect, Signal};
pub use callback::{Callback, IntoEventHandler, event_handler};
pub use component::{ElementView, Island, IntoView, MountError, Props, View, ViewEventHandler};
pub use dom::{Document, Element, EventType, document};
pub use error::HydrateError;
pub use hydration::{
	BoundaryState, ErrorBoundary, HydrationDriver, IslandDescriptor, IslandScanner, IslandTask,
};
pub use metrics::{HydrationMetrics, HydrationSummary};
pub use registry::ComponentRegistry;

// Logging macros are exported via #[macro_export]:
// atoll_islands::debug_log!, info_log!, warn_log!, error_log!.
