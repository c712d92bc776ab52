//! Context-menu targeting.
//!
//! A right-click can land on any primitive of the SVG (`<path>`, `<text>`, …);
//! the menu is anchored on the nearest ancestor that carries an id.  The walk
//! is redone on every event because the diagram may have been re-rendered in
//! between.

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

use super::dom::summarize;
use super::DiagramNode;
use crate::models::ContextMenuState;

/// Nearest node, starting at `origin` itself, with a non-empty id.
///
/// The walk stops at `boundary` (exclusive) or at the top of the tree.
pub fn resolve_target<N: DiagramNode>(origin: N, boundary: Option<&N>) -> Option<N> {
    let mut current = Some(origin);
    while let Some(node) = current {
        if boundary.map_or(false, |b| node.same_node(b)) {
            return None;
        }
        if node.node_id().map_or(false, |id| !id.is_empty()) {
            return Some(node);
        }
        current = node.parent();
    }
    None
}

/// Resolve the element a DOM event should anchor on inside `container`.
///
/// Events whose target lies outside the container resolve to `None`.
pub fn resolve_event_target(event: &Event, container: &Element) -> Option<Element> {
    let origin: Element = event.target()?.dyn_into().ok()?;
    if !container.contains(Some(&*origin)) {
        return None;
    }
    resolve_target(origin, Some(container))
}

/// Build the menu state for a right-click on the diagram.
///
/// `anchor` overrides the resolution (label clicks anchor on the label).  No
/// target means no menu.
pub fn menu_state_for_event(
    event: &MouseEvent,
    container: &Element,
    anchor: Option<&Element>,
) -> ContextMenuState {
    let target = match anchor {
        Some(el) => Some(el.clone()),
        None => resolve_event_target(event, container),
    };

    let Some(target) = target else {
        return ContextMenuState::default();
    };

    let rect = container.get_bounding_client_rect();
    ContextMenuState {
        visible: true,
        x: f64::from(event.client_x()) - rect.left(),
        y: f64::from(event.client_y()) - rect.top(),
        target: Some(summarize(&target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::fake::FakeNode;
    use proptest::prelude::*;

    #[test]
    fn anonymous_path_resolves_to_feeder_group() {
        let container = FakeNode::root("div", "diagram-container");
        let svg = container.child("svg", "", &[]);
        let feeder = svg.child("g", "feeder-7", &[]);
        let path = feeder.child("path", "", &[]);

        let found = resolve_target(path, Some(&container)).expect("feeder group");
        assert!(found.same_node(&feeder));
        assert_eq!(found.tag(), "g");
    }

    #[test]
    fn target_with_its_own_id_wins() {
        let container = FakeNode::root("div", "diagram-container");
        let feeder = container.child("g", "feeder-7", &[]);
        let breaker = feeder.child("g", "brk-1", &["sld-breaker"]);

        let found = resolve_target(breaker.clone(), Some(&container)).unwrap();
        assert!(found.same_node(&breaker));
    }

    #[test]
    fn nearest_identified_ancestor_not_the_outermost() {
        let container = FakeNode::root("div", "diagram-container");
        let vl = container.child("g", "vl-400kv", &[]);
        let feeder = vl.child("g", "feeder-7", &[]);
        let text = feeder.child("g", "", &[]).child("text", "", &[]);

        let found = resolve_target(text, Some(&container)).unwrap();
        assert!(found.same_node(&feeder));
    }

    #[test]
    fn boundary_is_never_returned() {
        let container = FakeNode::root("div", "diagram-container");
        let path = container.child("svg", "", &[]).child("path", "", &[]);

        assert!(resolve_target(path, Some(&container)).is_none());
    }

    #[test]
    fn no_boundary_walks_to_the_root() {
        let root = FakeNode::root("svg", "");
        let path = root.child("g", "", &[]).child("path", "", &[]);

        assert!(resolve_target(path, None).is_none());
    }

    proptest! {
        /// Build a chain `container > n0 > n1 > … > origin` where each flag
        /// says whether that level has an id; the resolver must return the
        /// deepest identified level.
        #[test]
        fn returns_closest_identified_ancestor(flags in prop::collection::vec(any::<bool>(), 1..12)) {
            let container = FakeNode::root("div", "diagram-container");
            let mut chain = Vec::new();
            let mut parent = container.clone();
            for (depth, has_id) in flags.iter().enumerate() {
                let id = if *has_id { format!("el-{}", depth) } else { String::new() };
                let node = parent.child("g", &id, &[]);
                chain.push(node.clone());
                parent = node;
            }
            let origin = chain.last().cloned().unwrap();

            let expected = flags.iter().rposition(|f| *f);
            let found = resolve_target(origin, Some(&container));

            match expected {
                Some(depth) => {
                    let node = found.expect("an identified ancestor exists");
                    prop_assert!(node.same_node(&chain[depth]));
                }
                None => prop_assert!(found.is_none()),
            }
        }
    }
}
