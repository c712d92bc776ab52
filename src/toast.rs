//! Tiny toast / notification helper.
//! Creates a `#toast-root` container once per page and appends toast divs that
//! fade-out after a few seconds.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::network::CommandError;

const TOAST_LIFETIME_MS: u32 = 4000;

#[derive(Debug, Clone, Copy)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn class_name(self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
        }
    }
}

pub fn success(msg: &str) {
    show(msg, ToastKind::Success);
}

pub fn error(msg: &str) {
    show(msg, ToastKind::Error);
}

/// Error toast for a failed host command.
pub fn command_failed(err: &CommandError) {
    error(&err.to_string());
}

pub fn show(message: &str, kind: ToastKind) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };
    if let Err(e) = try_show(&document, message, kind) {
        log_warn!("Failed to show toast '{}': {:?}", message, e);
    }
}

fn try_show(document: &Document, message: &str, kind: ToastKind) -> Result<(), JsValue> {
    ensure_styles(document)?;
    let root = ensure_root(document)?;

    let toast = document.create_element("div")?;
    toast.set_class_name("toast");
    toast.class_list().add_1(kind.class_name())?;
    toast.set_text_content(Some(message));

    // Prepend so newest appears on top.
    root.prepend_with_node_1(&toast)?;

    Timeout::new(TOAST_LIFETIME_MS, move || toast.remove()).forget();
    Ok(())
}

fn ensure_root(document: &Document) -> Result<Element, JsValue> {
    if let Some(el) = document.get_element_by_id("toast-root") {
        return Ok(el);
    }
    let body = document.body().ok_or_else(|| JsValue::from_str("document has no body"))?;
    let root = document.create_element("div")?;
    root.set_id("toast-root");
    root.set_class_name("toast-root");
    body.append_child(&root)?;
    Ok(root)
}

fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id("toast-styles").is_some() {
        return Ok(());
    }

    let css = "
.toast-root{position:fixed;bottom:16px;right:16px;display:flex;flex-direction:column;gap:8px;z-index:9999;font-family:system-ui,sans-serif;font-size:13px}
.toast{padding:8px 14px;border-radius:4px;color:#fff;box-shadow:0 2px 4px rgba(0,0,0,.15);opacity:0;animation:toast-in .2s forwards;max-width:420px}
.toast-success{background:#16a34a}
.toast-error{background:#dc2626}
@keyframes toast-in{to{opacity:1}}
";

    let style = document.create_element("style")?;
    style.set_id("toast-styles");
    style.set_text_content(Some(css));
    // Append to <head>, fall back to body
    let parent: Element = match document.head() {
        Some(head) => head.into(),
        None => document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .into(),
    };
    parent.append_child(&style)?;
    Ok(())
}
