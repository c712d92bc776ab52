//! In-memory diagram tree used by the unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{DiagramNode, DiagramScope, SwitchElement};

#[derive(Clone)]
pub(crate) struct FakeNode(Rc<Inner>);

struct Inner {
    tag: String,
    id: String,
    parent: Option<FakeNode>,
    classes: RefCell<Vec<String>>,
    flashes: Cell<u32>,
}

impl FakeNode {
    pub fn root(tag: &str, id: &str) -> Self {
        Self::build(tag, id, None, &[])
    }

    pub fn child(&self, tag: &str, id: &str, classes: &[&str]) -> Self {
        Self::build(tag, id, Some(self.clone()), classes)
    }

    fn build(tag: &str, id: &str, parent: Option<FakeNode>, classes: &[&str]) -> Self {
        FakeNode(Rc::new(Inner {
            tag: tag.to_string(),
            id: id.to_string(),
            parent,
            classes: RefCell::new(classes.iter().map(|c| c.to_string()).collect()),
            flashes: Cell::new(0),
        }))
    }

    pub fn tag(&self) -> &str {
        &self.0.tag
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.classes.borrow().clone()
    }

    pub fn flashes(&self) -> u32 {
        self.0.flashes.get()
    }
}

impl DiagramNode for FakeNode {
    fn node_id(&self) -> Option<String> {
        Some(self.0.id.clone())
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }

    fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl SwitchElement for FakeNode {
    fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.classes.borrow_mut().push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.classes.borrow_mut().retain(|c| c != class);
    }

    fn flash(&self) {
        self.0.flashes.set(self.0.flashes.get() + 1);
    }
}

/// Flat registry of the nodes below a root, standing in for `querySelector`.
#[derive(Default)]
pub(crate) struct FakeScope {
    nodes: Vec<FakeNode>,
}

impl FakeScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, node: &FakeNode) {
        self.nodes.push(node.clone());
    }

    /// `(id, classes)` of every registered node, for before/after comparisons.
    pub fn snapshot(&self) -> Vec<(String, Vec<String>)> {
        self.nodes
            .iter()
            .map(|n| (n.0.id.clone(), n.classes()))
            .collect()
    }
}

impl DiagramScope for FakeScope {
    type Element = FakeNode;

    fn find(&self, id: &str) -> Option<FakeNode> {
        self.nodes.iter().find(|n| !n.0.id.is_empty() && n.0.id == id).cloned()
    }
}
