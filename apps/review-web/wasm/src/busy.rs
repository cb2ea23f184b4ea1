//! Loading modal shown while a submission is in flight

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use web_sys::Element;

// Bootstrap 5 bundle, loaded globally by the page template
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap, js_name = Modal)]
    type BootstrapModal;

    #[wasm_bindgen(catch, constructor, js_namespace = bootstrap, js_class = "Modal")]
    fn new(element: &Element) -> Result<BootstrapModal, JsValue>;

    #[wasm_bindgen(method)]
    fn show(this: &BootstrapModal);

    #[wasm_bindgen(method)]
    fn hide(this: &BootstrapModal);
}

/// Wraps `#loadingModal`. Without the element or the Bootstrap global the
/// indicator silently does nothing.
pub struct BusyIndicator {
    element: Option<Element>,
    modal: Option<BootstrapModal>,
}

impl BusyIndicator {
    pub fn new(element: Option<Element>) -> Self {
        Self {
            element,
            modal: None,
        }
    }

    pub fn show(&mut self) {
        if self.modal.is_some() {
            return;
        }
        let Some(element) = &self.element else {
            return;
        };
        if !bootstrap_loaded() {
            return;
        }

        match BootstrapModal::new(element) {
            Ok(modal) => {
                modal.show();
                self.modal = Some(modal);
            }
            Err(e) => web_sys::console::error_2(&"Loading modal failed:".into(), &e),
        }
    }

    /// Safe to call repeatedly
    pub fn hide(&mut self) {
        if let Some(modal) = self.modal.take() {
            modal.hide();
        }
    }
}

fn bootstrap_loaded() -> bool {
    Reflect::has(&js_sys::global(), &JsValue::from_str("bootstrap")).unwrap_or(false)
}
