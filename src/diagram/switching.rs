//! Breaker / disconnector open-closed toggling.

use super::{DiagramScope, SwitchElement};
use crate::models::SwitchState;

/// Put the element `id` into the requested state.
///
/// `open == true` leaves only `sld-open` on the element, `false` only
/// `sld-closed`.  The opacity cue is replayed on every call, even when the
/// class set does not change.  Returns the applied state, or `None` when the
/// id is empty or not part of the diagram (a benign miss).  Ids are matched
/// exactly, surrounding whitespace included.
pub fn set_switch_state<S: DiagramScope>(scope: &S, id: &str, open: bool) -> Option<SwitchState> {
    if id.is_empty() {
        return None;
    }
    let element = scope.find(id)?;

    let state = SwitchState::from_open(open);
    apply_state(&element, state);
    element.flash();
    Some(state)
}

/// Flip the current state of `id` as read from its classes.
pub fn toggle_switch<S: DiagramScope>(scope: &S, id: &str) -> Option<SwitchState> {
    if id.is_empty() {
        return None;
    }
    let element = scope.find(id)?;

    let current = current_state(&element);
    set_switch_state(scope, id, current.opposite().is_open())
}

pub fn current_state<E: SwitchElement>(element: &E) -> SwitchState {
    if element.has_class(SwitchState::Closed.class_name()) {
        SwitchState::Closed
    } else {
        SwitchState::Open
    }
}

fn apply_state<E: SwitchElement>(element: &E, state: SwitchState) {
    element.remove_class(state.opposite().class_name());
    element.add_class(state.class_name());
}
