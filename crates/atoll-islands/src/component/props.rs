//! Props system for component properties.

use serde::de::DeserializeOwned;

use crate::warn_log;

/// Trait for component properties.
///
/// Props are the input data for islands, reconstructed during hydration
/// from the JSON bag serialized into the `data-props` attribute. Missing
/// or unusable values fall back to the type's `Default`, so a partial or
/// empty bag always produces usable props.
///
/// # Example
///
/// ```
/// use atoll_islands::component::Props;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(default, rename_all = "camelCase")]
/// struct CounterProps {
///     initial_count: i64,
/// }
///
/// impl Props for CounterProps {}
///
/// let props = CounterProps::from_value(&serde_json::json!({"initialCount": 5}));
/// assert_eq!(props.initial_count, 5);
///
/// let empty = CounterProps::from_value(&serde_json::json!({}));
/// assert_eq!(empty.initial_count, 0);
/// ```
pub trait Props: Default + DeserializeOwned {
	/// Constructs props from a JSON property bag.
	fn from_value(value: &serde_json::Value) -> Self {
		parse_props(value)
	}
}

/// Deserializes a props value, falling back to `Default` with a warning
/// when the bag does not fit the target type.
pub fn parse_props<P: Default + DeserializeOwned>(value: &serde_json::Value) -> P {
	serde_json::from_value(value.clone()).unwrap_or_else(|err| {
		warn_log!("island props did not match the expected shape: {err}");
		P::default()
	})
}
