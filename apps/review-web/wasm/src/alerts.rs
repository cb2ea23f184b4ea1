//! Dismissible Bootstrap alerts

use crate::timers::Timeout;
use review_core::fields::selectors;
use review_core::Notification;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

const CONTAINER_CLASS: &str = "alert-container";

/// Append an alert for `notification` and remove it once its ttl passes
pub fn show(document: &Document, notification: &Notification) -> Result<Element, JsValue> {
    let alert = document.create_element("div")?;
    alert.set_class_name(&notification.class_name());
    alert.set_inner_html(&notification.inner_html());

    container(document)?.append_child(&alert)?;

    let expiring = alert.clone();
    Timeout::schedule(notification.ttl, move || {
        // the user may already have dismissed it
        if expiring.parent_node().is_some() {
            expiring.remove();
        }
    })?;

    Ok(alert)
}

/// Existing `.alert-container`, or a new one prepended to `main`
fn container(document: &Document) -> Result<Element, JsValue> {
    if let Some(existing) = document.query_selector(selectors::ALERT_CONTAINER)? {
        return Ok(existing);
    }

    let container = document.create_element("div")?;
    container.set_class_name(CONTAINER_CLASS);

    let parent = match document.query_selector(selectors::MAIN)? {
        Some(main) => main,
        None => document
            .body()
            .map(Element::from)
            .ok_or_else(|| JsValue::from_str("Document has no body"))?,
    };
    parent.prepend_with_node_1(&container)?;

    Ok(container)
}
