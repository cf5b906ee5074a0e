//! The demonstration islands.
//!
//! Two widgets exercising the hydration machinery end to end: a counter
//! with reactive in-place updates, and a user-profile card with a
//! simulated asynchronous fetch.

mod counter;
mod user_profile;

pub use counter::{Counter, CounterProps};
pub use user_profile::{ProfileState, UserProfile, UserProfileProps, UserRecord};
