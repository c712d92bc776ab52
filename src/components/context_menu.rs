//! Diagram context menu.
//!
//! The menu is a single absolutely positioned `<div>` inside the diagram
//! container, rebuilt from [`ContextMenuState`] on every render.  Item
//! handlers live in a thread-local list that is replaced on each render so
//! stale closures are dropped together with their DOM nodes.

use std::cell::RefCell;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, MouseEvent};

use crate::constants::{CONTEXT_MENU_CLASS, CONTEXT_MENU_ID};
use crate::diagram::{set_switch_state, DomScope};
use crate::dom_utils::{clear_children, copy_to_clipboard, ensure_child, hide, place_at, show};
use crate::messages::Message;
use crate::models::{ContextMenuState, SwitchState, TargetSummary};
use crate::state::dispatch_global_message;

thread_local! {
    static MENU_HANDLERS: RefCell<Vec<Closure<dyn FnMut(MouseEvent)>>> = RefCell::new(Vec::new());
}

#[derive(Clone, Debug, PartialEq)]
pub enum MenuAction {
    CopyId,
    CopyText,
    CopyElement,
    SetBreaker { open: bool },
}

/// Entries offered for `target`, in display order.
pub fn menu_items(target: &TargetSummary) -> Vec<(&'static str, MenuAction)> {
    let mut items = vec![("Copy id", MenuAction::CopyId)];
    if !target.text.is_empty() {
        items.push(("Copy text", MenuAction::CopyText));
    }
    items.push(("Copy element", MenuAction::CopyElement));
    if target.is_breaker() {
        items.push(match target.switch_state() {
            SwitchState::Closed => ("Open breaker", MenuAction::SetBreaker { open: true }),
            SwitchState::Open => ("Close breaker", MenuAction::SetBreaker { open: false }),
        });
    }
    items
}

fn run_action(container_id: &str, target: &TargetSummary, action: &MenuAction) {
    match action {
        MenuAction::CopyId => copy_to_clipboard(&target.id),
        MenuAction::CopyText => copy_to_clipboard(&target.text),
        MenuAction::CopyElement => copy_to_clipboard(&target.to_markup()),
        MenuAction::SetBreaker { open } => {
            let applied = DomScope::by_container_id(container_id)
                .and_then(|scope| set_switch_state(&scope, &target.id, *open));
            if applied.is_none() {
                log_warn!("[diagram] breaker {} is no longer in the diagram", target.id);
            }
        }
    }
}

/// Draw (or hide) the menu of the diagram mounted in `container_id`.
pub fn render(container_id: &str, menu: &ContextMenuState) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let Some(container) = document.get_element_by_id(container_id) else {
        return Ok(());
    };

    let root = ensure_child(&document, &container, "div", CONTEXT_MENU_ID)?;
    root.set_class_name(CONTEXT_MENU_CLASS);
    clear_children(&root);
    let mut handlers = Vec::new();

    match (&menu.target, menu.visible) {
        (Some(target), true) => {
            let header = document.create_element("div")?;
            header.set_class_name("sld-context-menu-header");
            let title: &str = if target.is_label() && !target.text.is_empty() {
                &target.text
            } else {
                &target.id
            };
            header.set_text_content(Some(title));
            root.append_child(&header)?;

            for (label, action) in menu_items(target) {
                let (item, handler) = build_item(&document, container_id, target, label, action)?;
                root.append_child(&item)?;
                handlers.push(handler);
            }
            place_at(&root, menu.x, menu.y)?;
            show(&root);
        }
        _ => hide(&root),
    }

    // Old closures die here, after their elements were detached.
    MENU_HANDLERS.with(|cell| *mut_borrow!(cell) = handlers);
    Ok(())
}

fn build_item(
    document: &Document,
    container_id: &str,
    target: &TargetSummary,
    label: &str,
    action: MenuAction,
) -> Result<(Element, Closure<dyn FnMut(MouseEvent)>), JsValue> {
    let item = document.create_element("div")?;
    item.set_class_name("sld-context-menu-item");
    item.set_text_content(Some(label));

    let container_id = container_id.to_string();
    let target = target.clone();
    let handler = Closure::wrap(Box::new(move |event: MouseEvent| {
        event.stop_propagation();
        run_action(&container_id, &target, &action);
        // Closing re-renders the menu and drops this closure, so leave the
        // handler first.
        Timeout::new(0, || dispatch_global_message(Message::CloseContextMenu)).forget();
    }) as Box<dyn FnMut(_)>);
    item.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    Ok((item, handler))
}
