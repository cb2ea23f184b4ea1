//! `setTimeout` wrapper with cancellable handles

use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// A scheduled one-shot callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeout {
    id: i32,
}

impl Timeout {
    /// Run `callback` once after `delay`.
    ///
    /// The closure frees itself after running. A cancelled timeout keeps
    /// its closure alive, which is acceptable for the handful of timers a
    /// page creates.
    pub fn schedule<F>(delay: Duration, callback: F) -> Result<Self, JsValue>
    where
        F: FnOnce() + 'static,
    {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let callback = Closure::once_into_js(callback);
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);

        let id = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            millis,
        )?;

        Ok(Self { id })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    /// Clear a timeout by id. Clearing a fired or unknown id is a no-op.
    pub fn cancel_id(id: i32) {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(id);
        }
    }
}

/// Resolve after `delay`, for browser tests that wait on timers
#[cfg(all(test, target_arch = "wasm32"))]
pub(crate) async fn sleep(delay: Duration) {
    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}
