//! Fire-and-forget task spawning.
//!
//! Island tasks and island-internal async work (the simulated profile
//! fetch) are launched through here. On WASM this is the browser
//! microtask queue via `wasm-bindgen-futures`; on native targets the
//! future is polled once on the spot, which completes it because native
//! futures in this crate never wait on a timer or I/O (the simulated
//! fetch delay is WASM-only). A single poll also keeps spawning legal
//! inside an already-running executor, where `block_on` would panic.

use std::future::Future;

/// Spawns a future on the current thread without awaiting it.
#[cfg(target_arch = "wasm32")]
pub fn spawn_local<F>(future: F)
where
	F: Future<Output = ()> + 'static,
{
	wasm_bindgen_futures::spawn_local(future);
}

/// Spawns a future on the current thread without awaiting it.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_local<F>(future: F)
where
	F: Future<Output = ()> + 'static,
{
	let waker = futures::task::noop_waker();
	let mut cx = std::task::Context::from_waker(&waker);
	if std::pin::pin!(future).poll(&mut cx).is_pending() {
		crate::warn_log!("spawned future suspended on a native target and was dropped");
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use std::cell::Cell;
	use std::rc::Rc;

	#[test]
	fn test_spawn_local_runs_ready_future() {
		let ran = Rc::new(Cell::new(false));
		let ran_clone = ran.clone();

		spawn_local(async move {
			ran_clone.set(true);
		});

		assert!(ran.get());
	}

	#[test]
	fn test_spawn_local_inside_running_executor() {
		let ran = Rc::new(Cell::new(false));
		let ran_clone = ran.clone();

		futures::executor::block_on(async move {
			spawn_local(async move {
				ran_clone.set(true);
			});
		});

		assert!(ran.get());
	}

	#[test]
	fn test_spawn_local_drops_pending_future() {
		spawn_local(std::future::pending());
	}
}
