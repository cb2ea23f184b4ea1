//! WASM bindings for the code review web client
//!
//! The start function boots whatever the current page needs: the
//! submission form (input mode switching, language detection, validation,
//! loading modal) and, on the results page, report rendering plus the
//! code toggle and print helpers. All decisions live in `review-core`;
//! this crate reads the DOM and applies the effects it gets back.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { renderAnalysis, detectLanguage } from './pkg/review_wasm.js';
//!
//! await init(); // binds the page
//!
//! detectLanguage("print('hi')"); // "python"
//! document.querySelector('#preview').innerHTML = renderAnalysis(report);
//! ```
//!
//! The template's inline handlers (`loadSampleCode('python')`,
//! `toggleCode()`) resolve to window globals installed at start.

pub mod alerts;
pub mod busy;
pub mod editor;
pub mod form_page;
pub mod results;
pub mod timers;
pub mod view;

use form_page::FormPage;
use js_sys::Reflect;
use review_core::{FormState, Language, ReviewConfig};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

thread_local! {
    static PAGE: RefCell<Option<Rc<RefCell<FormPage>>>> = const { RefCell::new(None) };
}

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;

    install_globals(&window)?;

    if document.ready_state() == "loading" {
        let ready = document.clone();
        let on_ready = Closure::once(Box::new(move |_event: web_sys::Event| {
            if let Err(e) = boot(&ready) {
                web_sys::console::error_2(&"Code review boot failed:".into(), &e);
            }
        }) as Box<dyn FnOnce(_)>);
        document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())?;
        on_ready.forget();
    } else {
        boot(&document)?;
    }

    Ok(())
}

fn boot(document: &Document) -> Result<(), JsValue> {
    let page = FormPage::mount(document)?;
    let config = page.borrow().config().clone();
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));

    if results::mount(document, &config)? {
        web_sys::console::log_1(&"Code review results page ready".into());
    } else {
        web_sys::console::log_1(&"Code review form ready".into());
    }
    Ok(())
}

/// Expose `loadSampleCode` and `toggleCode` on `window` for inline handlers
fn install_globals(window: &web_sys::Window) -> Result<(), JsValue> {
    let load_sample = Closure::<dyn Fn(String)>::new(|language: String| {
        if let Err(e) = load_sample_code(&language) {
            web_sys::console::warn_1(&e);
        }
    });
    Reflect::set(window, &"loadSampleCode".into(), load_sample.as_ref())?;
    load_sample.forget();

    let toggle = Closure::<dyn Fn()>::new(|| {
        if let Err(e) = toggle_code() {
            web_sys::console::error_1(&e);
        }
    });
    Reflect::set(window, &"toggleCode".into(), toggle.as_ref())?;
    toggle.forget();

    Ok(())
}

/// Fill the form with the sample snippet for `language`
#[wasm_bindgen(js_name = loadSampleCode)]
pub fn load_sample_code(language: &str) -> Result<(), JsValue> {
    let language = Language::parse(language)
        .map_err(|e| JsValue::from_str(&e.to_string()))?
        .ok_or_else(|| JsValue::from_str("No language given"))?;

    let page = PAGE.with(|slot| slot.borrow().clone());
    let page = page.ok_or_else(|| JsValue::from_str("Page not initialized"))?;
    let mut page = page
        .try_borrow_mut()
        .map_err(|_| JsValue::from_str("Page is busy"))?;
    page.load_sample(language);
    Ok(())
}

/// Collapse or expand the source listing on the results page
#[wasm_bindgen(js_name = toggleCode)]
pub fn toggle_code() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    results::toggle_code(&document)
}

/// Render an analysis report to HTML
#[wasm_bindgen(js_name = renderAnalysis)]
pub fn render_analysis(report: &str) -> String {
    review_core::render(report)
}

/// Guess the language of a code snippet ("python", "javascript" or undefined)
#[wasm_bindgen(js_name = detectLanguage)]
pub fn detect_language(text: &str) -> Option<String> {
    review_core::detect(text).map(|language| language.as_str().to_string())
}

#[wasm_bindgen(js_name = formatFileSize)]
pub fn format_file_size(bytes: f64) -> String {
    review_core::format_file_size(bytes.max(0.0) as u64)
}

/// Validate a form snapshot (`{ selected_language, input_mode, code_text, selected_file }`)
#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form: JsValue) -> Result<JsValue, JsValue> {
    let form: FormState = serde_wasm_bindgen::from_value(form)
        .map_err(|e| JsValue::from_str(&format!("Invalid form: {}", e)))?;
    let config = PAGE
        .with(|slot| slot.borrow().as_ref().map(|page| page.borrow().config().clone()))
        .unwrap_or_else(ReviewConfig::default);

    let result = review_core::Validator::new((&config).into()).validate(&form);
    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
