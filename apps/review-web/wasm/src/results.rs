//! Results page: report rendering, code toggle and print preparation

use crate::timers::Timeout;
use js_sys::Reflect;
use review_core::fields::{selectors, Field};
use review_core::{render, ReviewConfig};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

const PRINT_STYLES: &str = r#"
@media print {
    .btn, .navbar, .modal { display: none !important; }
    .card { border: 1px solid #dee2e6 !important; page-break-inside: avoid; }
    .card-header { background-color: #f8f9fa !important; color: #000 !important; }
    pre { font-size: 10px; page-break-inside: avoid; }
    .alert { border: 1px solid #dee2e6; page-break-inside: avoid; }
    h1, h2, h3, h4, h5, h6 { page-break-after: avoid; }
    .ai-analysis-content h4, .ai-analysis-content h5 { color: #000 !important; }
    body { font-size: 12px; }
}
"#;

const COLLAPSED_HEIGHT: &str = "400px";

// Prism is optional; `catch` turns a missing global into an Err
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Prism, js_name = highlightAll)]
    fn prism_highlight_all() -> Result<(), JsValue>;
}

/// Post-process the results view. Returns false when this is not a results page.
pub fn mount(document: &Document, config: &ReviewConfig) -> Result<bool, JsValue> {
    let Some(content) = document.query_selector(selectors::ANALYSIS_CONTENT)? else {
        return Ok(false);
    };

    format_analysis(&content);
    bind_code_toggle(document)?;
    bind_print_button(document, config.print_grace())?;

    if Reflect::has(&js_sys::global(), &JsValue::from_str("Prism")).unwrap_or(false) {
        if let Err(e) = prism_highlight_all() {
            web_sys::console::warn_2(&"Syntax highlighting failed:".into(), &e);
        }
    }

    Ok(true)
}

/// Replace the raw report text with rendered markup
pub fn format_analysis(content: &Element) {
    let report = content.text_content().unwrap_or_default();
    content.set_inner_html(&render(&report));
}

/// Flip the embedded source listing between collapsed and full height
pub fn toggle_code(document: &Document) -> Result<(), JsValue> {
    let Some(container) = document.get_element_by_id(Field::CodeContainer.dom_id()) else {
        return Ok(());
    };
    let Some(pre) = container.query_selector("pre")? else {
        return Ok(());
    };
    let style = pre.dyn_into::<HtmlElement>()?.style();

    let max_height = style.get_property_value("max-height")?;
    if max_height.is_empty() || max_height == "none" {
        style.set_property("max-height", COLLAPSED_HEIGHT)?;
        style.set_property("overflow-y", "auto")?;
    } else {
        style.set_property("max-height", "none")?;
        style.set_property("overflow-y", "visible")?;
    }
    Ok(())
}

/// Inject the print stylesheet, print, and drop the sheet after `grace`
pub fn print_results(document: &Document, grace: Duration) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no head"))?;

    let sheet = document.create_element("style")?;
    sheet.set_text_content(Some(PRINT_STYLES));
    head.append_child(&sheet)?;

    window.print()?;

    Timeout::schedule(grace, move || sheet.remove())?;
    Ok(())
}

fn bind_code_toggle(document: &Document) -> Result<(), JsValue> {
    let Some(button) = document.query_selector(selectors::CODE_TOGGLE_BUTTON)? else {
        return Ok(());
    };
    let button: HtmlElement = button.dyn_into()?;

    let doc = document.clone();
    let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        if let Err(e) = toggle_code(&doc) {
            web_sys::console::error_1(&e);
        }
    });
    button.set_onclick(Some(callback.as_ref().unchecked_ref()));
    callback.forget();
    Ok(())
}

fn bind_print_button(document: &Document, grace: Duration) -> Result<(), JsValue> {
    let Some(button) = document.query_selector(selectors::PRINT_BUTTON)? else {
        return Ok(());
    };
    let button: HtmlElement = button.dyn_into()?;

    let doc = document.clone();
    let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        if let Err(e) = print_results(&doc, grace) {
            web_sys::console::error_2(&"Print failed:".into(), &e);
        }
    });
    button.set_onclick(Some(callback.as_ref().unchecked_ref()));
    callback.forget();
    Ok(())
}
