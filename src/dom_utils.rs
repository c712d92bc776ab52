//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Small, **ergonomic** wrappers for show / hide / positioning patterns so the
//! diagram and menu code does not sprinkle `set_attribute("style", …)` calls
//! everywhere.  SVG and HTML elements expose `style` through different
//! interfaces; `style_of` hides that split.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CssStyleDeclaration, Document, Element, HtmlElement, SvgElement};

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

/// Inline style of an HTML or SVG element.
pub fn style_of(el: &Element) -> Option<CssStyleDeclaration> {
    if let Some(svg) = el.dyn_ref::<SvgElement>() {
        return Some(svg.style());
    }
    el.dyn_ref::<HtmlElement>().map(HtmlElement::style)
}

/// Absolutely position `el` at `(x, y)` pixels inside its offset parent.
pub fn place_at(el: &Element, x: f64, y: f64) -> Result<(), JsValue> {
    let style = style_of(el).ok_or_else(|| JsValue::from_str("element has no inline style"))?;
    style.set_property("position", "absolute")?;
    style.set_property("left", &format!("{}px", x))?;
    style.set_property("top", &format!("{}px", y))?;
    Ok(())
}

/// Return the element with `id`, creating a `<tag id=…>` under `parent` when
/// it does not exist yet.
pub fn ensure_child(document: &Document, parent: &Element, tag: &str, id: &str) -> Result<Element, JsValue> {
    if let Some(el) = document.get_element_by_id(id) {
        return Ok(el);
    }
    let el = document.create_element(tag)?;
    el.set_id(id);
    parent.append_child(&el)?;
    Ok(el)
}

/// Remove every child of `el`.
pub fn clear_children(el: &Element) {
    while let Some(child) = el.first_child() {
        let _ = el.remove_child(&child);
    }
}

/// Best-effort `navigator.clipboard.writeText`.
///
/// The Clipboard API is looked up dynamically: some web-view shells do not
/// expose it and the copy actions simply do nothing there.
pub fn copy_to_clipboard(text: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator: JsValue = window.navigator().into();
    let clipboard = match js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")) {
        Ok(c) if !c.is_undefined() && !c.is_null() => c,
        _ => {
            crate::log_warn!("[clipboard] not available in this web view");
            return;
        }
    };
    let write = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    if let Some(write) = write {
        if let Err(e) = write.call1(&clipboard, &JsValue::from_str(text)) {
            crate::log_warn!("[clipboard] writeText failed: {:?}", e);
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests (run with `cargo test --lib` in the frontend crate)
// ---------------------------------------------------------------------------
