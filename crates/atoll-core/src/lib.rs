//! Atoll Core - Reactive Primitives
//!
//! The small reactive kernel used by Atoll island components to bind state
//! to server-rendered markup:
//!
//! - [`Signal`]: a shared mutable value that records which effects read it
//! - [`Effect`]: a side effect that re-runs when a signal it read changes
//!
//! Dependencies are tracked automatically: any `Signal::get()` call made
//! while an effect is running subscribes that effect to the signal. There
//! is no scheduler; notification is synchronous, which is all a page of
//! independent islands needs.
//!
//! ## Example
//!
//! ```
//! use atoll_core::{Effect, Signal};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let count = Signal::new(0);
//! let seen = Rc::new(RefCell::new(Vec::new()));
//!
//! let _effect = Effect::new({
//!     let count = count.clone();
//!     let seen = seen.clone();
//!     move || seen.borrow_mut().push(count.get())
//! });
//!
//! count.set(1);
//! count.update(|n| *n += 1);
//! assert_eq!(*seen.borrow(), vec![0, 1, 2]);
//! ```

#![warn(missing_docs)]

pub mod reactive;

pub use reactive::{Effect, Signal};
