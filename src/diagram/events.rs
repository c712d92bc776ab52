//! DOM listeners of a mounted diagram.
//!
//! Listeners are delegated to the container (and the document for
//! outside-click / Escape) so a re-rendered SVG needs no re-wiring.  They
//! are removed when the [`DiagramListeners`] owning them is dropped.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Event, KeyboardEvent, MouseEvent};

use super::context_menu::{menu_state_for_event, resolve_target};
use super::dom::{play_switching_animation, DomScope};
use super::switching::toggle_switch;
use crate::constants::{CLASS_LABEL, CONTEXT_MENU_ID, SWITCHABLE_SELECTOR};
use crate::messages::Message;
use crate::models::SwitchState;
use crate::state::dispatch_global_message;

thread_local! {
    static MOUNTED: RefCell<Option<DiagramListeners>> = RefCell::new(None);
}

type MouseHandler = Closure<dyn FnMut(MouseEvent)>;

pub struct DiagramListeners {
    container: Element,
    document: Document,
    on_context_menu: MouseHandler,
    on_click: MouseHandler,
    on_outside_down: MouseHandler,
    on_key_down: Closure<dyn FnMut(KeyboardEvent)>,
}

impl DiagramListeners {
    fn attach(document: &Document, container: &Element) -> Result<Self, JsValue> {
        let menu_container = container.clone();
        let on_context_menu = Closure::wrap(Box::new(move |event: MouseEvent| {
            if event_element(&event).map_or(false, |el| in_menu(&el)) {
                return;
            }
            event.prevent_default();
            let menu = menu_state_for_event(&event, &menu_container, None);
            dispatch_global_message(Message::OpenContextMenu(menu));
        }) as Box<dyn FnMut(_)>);

        let click_container = container.clone();
        let on_click = Closure::wrap(Box::new(move |event: MouseEvent| {
            handle_click(&event, &click_container);
        }) as Box<dyn FnMut(_)>);

        let on_outside_down = Closure::wrap(Box::new(move |event: MouseEvent| {
            if event_element(&event).map_or(false, |el| in_menu(&el)) {
                return;
            }
            dispatch_global_message(Message::CloseContextMenu);
        }) as Box<dyn FnMut(_)>);

        let on_key_down = Closure::wrap(Box::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                dispatch_global_message(Message::CloseContextMenu);
            }
        }) as Box<dyn FnMut(_)>);

        container.add_event_listener_with_callback("contextmenu", on_context_menu.as_ref().unchecked_ref())?;
        container.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
        document.add_event_listener_with_callback("mousedown", on_outside_down.as_ref().unchecked_ref())?;
        document.add_event_listener_with_callback("keydown", on_key_down.as_ref().unchecked_ref())?;

        Ok(Self {
            container: container.clone(),
            document: document.clone(),
            on_context_menu,
            on_click,
            on_outside_down,
            on_key_down,
        })
    }
}

impl Drop for DiagramListeners {
    fn drop(&mut self) {
        let _ = self
            .container
            .remove_event_listener_with_callback("contextmenu", self.on_context_menu.as_ref().unchecked_ref());
        let _ = self
            .container
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
        let _ = self
            .document
            .remove_event_listener_with_callback("mousedown", self.on_outside_down.as_ref().unchecked_ref());
        let _ = self
            .document
            .remove_event_listener_with_callback("keydown", self.on_key_down.as_ref().unchecked_ref());
    }
}

/// Left click: labels open the menu anchored on themselves, switching
/// devices toggle.
fn handle_click(event: &MouseEvent, container: &Element) {
    let Some(origin) = event_element(event) else {
        return;
    };
    if in_menu(&origin) {
        return;
    }

    if let Some(label) = closest_within(&origin, &format!(".{}", CLASS_LABEL), container) {
        event.prevent_default();
        event.stop_propagation();
        let menu = menu_state_for_event(event, container, Some(&label));
        dispatch_global_message(Message::OpenContextMenu(menu));
        return;
    }

    let Some(device) = closest_within(&origin, SWITCHABLE_SELECTOR, container) else {
        return;
    };
    event.prevent_default();
    event.stop_propagation();

    let Some(owner) = resolve_target(device, Some(container)) else {
        return;
    };
    let scope = DomScope::new(container.clone());
    if let Some(state) = toggle_switch(&scope, &owner.id()) {
        play_switching_animation(&owner, state == SwitchState::Closed);
    }
}

fn event_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into().ok()
}

fn in_menu(el: &Element) -> bool {
    matches!(el.closest(&format!("#{}", CONTEXT_MENU_ID)), Ok(Some(_)))
}

fn closest_within(origin: &Element, selector: &str, container: &Element) -> Option<Element> {
    let found = origin.closest(selector).ok().flatten()?;
    container.contains(Some(&*found)).then_some(found)
}

/// Wire the diagram hosted in `container_id`.  Mounting again replaces the
/// previous listeners.
pub fn mount(container_id: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let container = document
        .get_element_by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("diagram container #{} not found", container_id)))?;

    let listeners = DiagramListeners::attach(&document, &container)?;
    let previous = MOUNTED.with(|slot| mut_borrow!(slot).replace(listeners));
    drop(previous);

    log_info!("[diagram] mounted in #{}", container_id);
    dispatch_global_message(Message::DiagramMounted {
        container_id: container_id.to_string(),
    });
    Ok(())
}

pub fn unmount() {
    let previous = MOUNTED.with(|slot| mut_borrow!(slot).take());
    if previous.is_some() {
        drop(previous);
        dispatch_global_message(Message::DiagramUnmounted);
    }
}
