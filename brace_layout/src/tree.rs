use std::fmt;

use smallvec::SmallVec;

/// A handle to a view stored in a [`ViewTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(usize);

impl ViewId {
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Anything that can tell which view immediately contains another one.
///
/// Percentages are always resolved against this container, never against an ancestor further up.
pub trait Hierarchy {
    fn container(&self, view: ViewId) -> Option<ViewId>;
}

#[derive(Debug, Default, Clone)]
struct Node {
    parent: Option<ViewId>,
    children: SmallVec<[ViewId; 4]>,
}

/// A minimal arena of views with parent/child containment.
///
/// Views are never removed, only detached, so a [`ViewId`] stays valid for the lifetime of the
/// tree.
#[derive(Debug, Default, Clone)]
pub struct ViewTree {
    nodes: Vec<Node>,
}

impl ViewTree {
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Inserts a view that has no container.
    pub fn insert_root(&mut self) -> ViewId {
        let id = ViewId(self.nodes.len());
        self.nodes.push(Node::default());
        id
    }

    /// Inserts a view as the last child of `parent`.
    pub fn insert_child(&mut self, parent: ViewId) -> ViewId {
        let id = self.insert_root();
        self.attach(id, parent);
        id
    }

    pub fn contains(&self, view: ViewId) -> bool {
        view.0 < self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, view: ViewId) -> &[ViewId] {
        self.nodes
            .get(view.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Moves `view` under `parent`, detaching it from its previous container first.
    ///
    /// Unknown views, and attaching a view to itself, are ignored.
    pub fn attach(&mut self, view: ViewId, parent: ViewId) {
        if view == parent || !self.contains(view) || !self.contains(parent) {
            return;
        }
        self.detach(view);
        self.nodes[view.0].parent = Some(parent);
        self.nodes[parent.0].children.push(view);
    }

    /// Removes `view` from its container. Its own children stay attached to it.
    pub fn detach(&mut self, view: ViewId) {
        let Some(parent) = self.nodes.get_mut(view.0).and_then(|node| node.parent.take()) else {
            return;
        };
        self.nodes[parent.0].children.retain(|child| *child != view);
    }
}

impl Hierarchy for ViewTree {
    fn container(&self, view: ViewId) -> Option<ViewId> {
        self.nodes.get(view.0).and_then(|node| node.parent)
    }
}
