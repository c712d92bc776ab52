//! Single-line diagram interaction: element lookup, breaker state toggling and
//! context-menu targeting.
//!
//! The algorithms are written against the small traits below so they can run
//! over the live SVG (`dom`) as well as over an in-memory tree in unit tests.

pub mod context_menu;
pub mod dom;
pub mod events;
pub mod switching;

#[cfg(test)]
pub(crate) mod fake;

pub use context_menu::{menu_state_for_event, resolve_event_target, resolve_target};
pub use dom::DomScope;
pub use switching::{set_switch_state, toggle_switch};

/// A node of the diagram tree that can be walked towards the root.
pub trait DiagramNode: Sized {
    /// Identifier of the node; `None` or an empty string means "anonymous".
    fn node_id(&self) -> Option<String>;

    fn parent(&self) -> Option<Self>;

    /// Identity comparison, used to detect the diagram boundary.
    fn same_node(&self, other: &Self) -> bool;
}

/// An element whose visual state is carried by CSS classes.
pub trait SwitchElement {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    /// Short opacity dip-and-restore.  Must not block the caller.
    fn flash(&self);
}

/// Root of one rendered diagram.
pub trait DiagramScope {
    type Element: SwitchElement;

    /// Locate an element by id below the scope root.  Unknown or malformed ids
    /// are a miss, not an error.
    fn find(&self, id: &str) -> Option<Self::Element>;
}
