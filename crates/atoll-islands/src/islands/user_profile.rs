//! The user-profile island.
//!
//! Shows a loading indicator immediately, then resolves a simulated fetch
//! into the profile card (or a "User not found" alert). State transitions
//! re-render the island through its error boundary, so a failure during
//! the delayed update trips the boundary instead of escaping.

use std::cell::Cell;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use atoll_core::{Effect, Signal};

use crate::callback::event_handler;
use crate::component::{ElementView, Island, IntoView, Props, View};
use crate::dom::{Element, EventType};
use crate::error::HydrateError;
use crate::hydration::{IslandContext, attach_handlers};
use crate::spawn;

/// Simulated fetch latency on the page.
#[cfg(target_arch = "wasm32")]
const FETCH_DELAY_MS: u32 = 500;

/// Props for [`UserProfile`], from `data-props='{"userId": "..."}'`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfileProps {
	/// The id of the user to look up.
	pub user_id: String,
}

impl Props for UserProfileProps {}

/// The mocked user record the simulated fetch resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
	/// The looked-up user id.
	pub id: String,
	/// Display name.
	pub name: String,
	/// Contact email.
	pub email: String,
	/// Role title.
	pub role: String,
	/// Join date, ISO formatted.
	pub joined: String,
}

/// The island's lifecycle: `Loading → Loaded | NotFound`, driven by the
/// simulated fetch.
#[derive(Debug, Clone)]
pub enum ProfileState {
	/// Fetch in flight; the loading indicator is showing.
	Loading,
	/// Fetch resolved; the profile card is showing.
	Loaded(UserRecord),
	/// The lookup missed; the "User not found" alert is showing.
	NotFound,
}

/// Error from the mocked user lookup.
#[derive(Debug, Clone, Error)]
pub enum ProfileFetchError {
	/// The island was rendered without a user id to look up.
	#[error("user lookup requires a user id")]
	MissingUserId,
}

/// A user-profile card hydrated from server-rendered loading markup.
pub struct UserProfile {
	user_id: String,
	state: Signal<ProfileState>,
}

impl UserProfile {
	/// Creates a profile island for the given user id.
	pub fn new(user_id: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			state: Signal::new(ProfileState::Loading),
		}
	}

	/// Creates a profile island from a parsed property bag.
	pub fn from_props(props: &Value) -> Self {
		Self::new(UserProfileProps::from_value(props).user_id)
	}

	/// Returns the current lifecycle state.
	pub fn state(&self) -> ProfileState {
		self.state.get_untracked()
	}
}

impl Island for UserProfile {
	fn render(&self) -> View {
		profile_view(&self.state.get_untracked())
	}

	fn bind(&self, root: &Element, ctx: &IslandContext) -> Result<(), HydrateError> {
		attach_handlers(root, &self.render(), ctx)?;

		// Re-render on state change, routed through the boundary. The
		// first run only subscribes; the server markup is already there.
		let state = self.state.clone();
		let root_handle = root.clone();
		let render_ctx = ctx.clone();
		let first_run = Cell::new(true);
		let effect = Effect::new(move || {
			let current = state.get();
			if first_run.replace(false) {
				return;
			}
			let boundary = render_ctx.boundary().clone();
			boundary.guard(|| {
				let view = profile_view(&current);
				root_handle.clear_children();
				view.mount(&root_handle, render_ctx.document())
					.map_err(|err| HydrateError::failure(render_ctx.name(), err))?;
				attach_handlers(&root_handle, &view, &render_ctx)
			});
		});
		ctx.retain(effect);

		// Launch the simulated fetch; its completion flows back through
		// the state signal, its failure through the boundary.
		let state = self.state.clone();
		let boundary = ctx.boundary().clone();
		let name = ctx.name().to_string();
		let user_id = self.user_id.clone();
		spawn::spawn_local(async move {
			match fetch_user(&user_id).await {
				Ok(Some(user)) => state.set(ProfileState::Loaded(user)),
				Ok(None) => state.set(ProfileState::NotFound),
				Err(error) => boundary.fail(&HydrateError::failure(&name, error)),
			}
		});

		Ok(())
	}
}

/// Simulated user lookup; stands in for `GET /api/users/{id}`.
///
/// Ids prefixed `missing-` resolve to no user; an empty id fails the
/// lookup outright.
async fn fetch_user(user_id: &str) -> Result<Option<UserRecord>, ProfileFetchError> {
	#[cfg(target_arch = "wasm32")]
	gloo_timers::future::TimeoutFuture::new(FETCH_DELAY_MS).await;

	if user_id.is_empty() {
		return Err(ProfileFetchError::MissingUserId);
	}
	if user_id.starts_with("missing-") {
		return Ok(None);
	}

	Ok(Some(UserRecord {
		id: user_id.to_string(),
		name: "John Doe".to_string(),
		email: "john@example.com".to_string(),
		role: "Developer".to_string(),
		joined: "2023-01-01".to_string(),
	}))
}

/// The markup for each lifecycle state.
fn profile_view(state: &ProfileState) -> View {
	match state {
		ProfileState::Loading => ElementView::new("div")
			.attr("class", "island-component user-profile loading")
			.attr("aria-busy", "true")
			.attr("aria-live", "polite")
			.child(
				ElementView::new("div")
					.attr("class", "loading-indicator")
					.attr("role", "status")
					.child("Loading user profile..."),
			)
			.into_view(),
		ProfileState::NotFound => ElementView::new("div")
			.attr("class", "island-component user-profile error")
			.attr("role", "alert")
			.child(
				ElementView::new("p")
					.attr("class", "error-message")
					.child("User not found"),
			)
			.into_view(),
		ProfileState::Loaded(user) => {
			let contact_label = format!("Contact {}", user.name);
			let contact_name = user.name.clone();
			ElementView::new("div")
				.attr("class", "island-component user-profile")
				.attr("role", "region")
				.attr("aria-labelledby", "profile-heading")
				.child(
					ElementView::new("h3")
						.attr("id", "profile-heading")
						.child("User Profile"),
				)
				.child(
					ElementView::new("div")
						.attr("class", "profile-card")
						.child(ElementView::new("h4").child(user.name.clone()))
						.child(
							ElementView::new("dl")
								.attr("class", "profile-details")
								.child(ElementView::new("dt").child("Email"))
								.child(ElementView::new("dd").child(user.email.clone()))
								.child(ElementView::new("dt").child("Role"))
								.child(ElementView::new("dd").child(user.role.clone()))
								.child(ElementView::new("dt").child("Joined"))
								.child(ElementView::new("dd").child(user.joined.clone())),
						)
						.child(
							ElementView::new("button")
								.attr("class", "contact-button")
								.attr("aria-label", contact_label.clone())
								.on(
									EventType::Click,
									event_handler(move |_| contact(&contact_name)),
								)
								.child("Contact"),
						),
				)
				.into_view()
		}
	}
}

/// Contact action for the profile card.
#[cfg(target_arch = "wasm32")]
fn contact(name: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(&format!("Contact {name}"));
	}
}

/// Contact action for the profile card (native: log only).
#[cfg(not(target_arch = "wasm32"))]
fn contact(name: &str) {
	crate::info_log!("Contact {name}");
}
