//! Component system for atoll-islands.
//!
//! - [`View`]/[`ElementView`]/[`IntoView`]: a renderable tree with
//!   attributes, children, and event handlers
//! - [`Island`]: the trait island components implement
//! - [`Props`]: typed component properties parsed from the `data-props`
//!   JSON bag
//!
//! Views render to HTML strings (for fallbacks and tests) and mount into
//! the DOM; binding handlers onto *existing* markup is the hydration
//! module's job.

mod island;
mod props;
mod view;

pub use island::{BoxedIsland, Island};
pub use props::{Props, parse_props};
pub use view::{ElementView, IntoView, MountError, View, ViewEventHandler};
