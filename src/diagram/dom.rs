//! Live-DOM implementations of the diagram traits.

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::Element;

use super::{DiagramNode, DiagramScope, SwitchElement};
use crate::constants::{
    CLASS_SWITCHING, CLASS_SWITCHING_CLOSE, CLASS_SWITCHING_OPEN, FLASH_DURATION_MS, FLASH_OPACITY,
    SWITCHING_ANIMATION_MS,
};
use crate::dom_utils;
use crate::models::TargetSummary;

impl DiagramNode for Element {
    fn node_id(&self) -> Option<String> {
        let id = self.id();
        if id.is_empty() {
            None
        } else {
            Some(id)
        }
    }

    fn parent(&self) -> Option<Self> {
        self.parent_element()
    }

    fn same_node(&self, other: &Self) -> bool {
        self.is_same_node(Some(&**other))
    }
}

impl SwitchElement for Element {
    fn has_class(&self, class: &str) -> bool {
        self.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn flash(&self) {
        let Some(style) = dom_utils::style_of(self) else {
            return;
        };
        let _ = style.set_property("transition", "none");
        let _ = style.set_property("opacity", FLASH_OPACITY);

        // Restore on the next tick so the dip is painted before the
        // transition back to full opacity starts.
        Timeout::new(0, move || {
            let _ = style.set_property("transition", &format!("opacity {}ms ease-in-out", FLASH_DURATION_MS));
            let _ = style.set_property("opacity", "1");
            Timeout::new(FLASH_DURATION_MS, move || {
                let _ = style.remove_property("transition");
                let _ = style.remove_property("opacity");
            })
            .forget();
        })
        .forget();
    }
}

/// The container a diagram SVG is mounted into.
#[derive(Clone, Debug)]
pub struct DomScope {
    root: Element,
}

impl DomScope {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Scope rooted at the element with the given id in the current document.
    pub fn by_container_id(container_id: &str) -> Option<Self> {
        web_sys::window()?
            .document()?
            .get_element_by_id(container_id)
            .map(Self::new)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

impl DiagramScope for DomScope {
    type Element = Element;

    fn find(&self, id: &str) -> Option<Element> {
        // Ids coming from the renderer are not valid CSS identifiers in
        // general (dots, leading digits), so compare attributes instead of
        // building a `#id` selector.
        let candidates = self.root.query_selector_all("[id]").ok()?;
        (0..candidates.length())
            .filter_map(|i| candidates.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .find(|el| el.id() == id)
    }
}

/// Capture the plain-data view of an element for the context menu.
pub fn summarize(element: &Element) -> TargetSummary {
    let classes = element
        .get_attribute("class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    let attrs = element.attributes();
    let attributes = (0..attrs.length())
        .filter_map(|i| attrs.item(i))
        .map(|attr| (attr.name(), attr.value()))
        .collect();

    TargetSummary {
        id: element.id(),
        tag_name: element.tag_name(),
        classes,
        text: element.text_content().unwrap_or_default().trim().to_string(),
        attributes,
    }
}

/// Switching keyframes played around a direct click on a breaker.
pub fn play_switching_animation(element: &Element, closing: bool) {
    let variant = if closing {
        CLASS_SWITCHING_CLOSE
    } else {
        CLASS_SWITCHING_OPEN
    };
    let _ = element.class_list().add_2(CLASS_SWITCHING, variant);

    let element = element.clone();
    Timeout::new(SWITCHING_ANIMATION_MS, move || {
        let _ = element.class_list().remove_2(CLASS_SWITCHING, variant);
    })
    .forget();
}
