//! Detached task spawning for fire-and-forget tracking calls.

use std::future::Future;

/// Run `future` in the background on the browser's microtask queue.
#[cfg(target_arch = "wasm32")]
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Run `future` in the background on the current tokio runtime.
///
/// Outside of a runtime the work is dropped with a warning instead of
/// panicking.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(future);
        }
        Err(_) => crate::log_warn!("no tokio runtime available, analytics event dropped"),
    }
}
