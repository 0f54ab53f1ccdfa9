//! Thin helpers over `web_sys` for the page elements

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// First element matching `selector`
pub fn element(selector: &str) -> Result<Element, JsValue> {
    document()?
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("element {} not found", selector)))
}

/// Text content of the element matching `selector`
pub fn text(selector: &str) -> Result<String, JsValue> {
    Ok(element(selector)?.text_content().unwrap_or_default())
}

pub fn input(selector: &str) -> Result<HtmlInputElement, JsValue> {
    element(selector)?.dyn_into::<HtmlInputElement>().map_err(JsValue::from)
}

pub fn set_html(selector: &str, html: &str) -> Result<(), JsValue> {
    element(selector)?.set_inner_html(html);
    Ok(())
}

/// Run `handler` on every click of the element matching `selector`
pub fn on_click(selector: &str, handler: impl FnMut() + 'static) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut()>::new(handler);
    element(selector)?
        .add_event_listener_with_callback("click", callback.as_ref().unchecked_ref())?;
    // The element owns the listener from here on
    callback.forget();
    Ok(())
}

pub fn log_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}
