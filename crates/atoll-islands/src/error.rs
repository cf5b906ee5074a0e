//! Error taxonomy for island hydration.
//!
//! Every error is contained to the single affected island: the scanner,
//! driver, and boundary all log-and-continue so one broken island never
//! blocks its siblings.

use thiserror::Error;

/// Errors raised while hydrating an island.
#[derive(Debug, Clone, Error)]
pub enum HydrateError {
	/// The component name on the marker element has no registry entry.
	/// The island is skipped and left static.
	#[error("unknown island component: {0}")]
	UnknownComponent(String),

	/// The `data-props` attribute held malformed JSON. The scanner reports
	/// this as a warning and hydrates the island with an empty property
	/// bag instead of aborting.
	#[error("malformed props for island {component}: {message}")]
	PropsParse {
		/// The component name of the affected island.
		component: String,
		/// The JSON parser's description of the problem.
		message: String,
	},

	/// Any error raised during or after binding the component to its
	/// markup. Caught by the island's error boundary, which substitutes a
	/// visible fallback.
	#[error("hydration failed for island {name}: {reason}")]
	HydrationFailure {
		/// The island's component name.
		name: String,
		/// Human-readable failure description.
		reason: String,
	},
}

impl HydrateError {
	/// Builds a [`HydrateError::HydrationFailure`] for the named island.
	pub fn failure(name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
		Self::HydrationFailure {
			name: name.into(),
			reason: reason.to_string(),
		}
	}
}
