use emath::Rect;

use crate::{Anchor, CassowaryEngine, Frames, LayoutError, ViewId, ViewTree};

/// A [`ViewTree`] together with the [`CassowaryEngine`] its intents are issued to.
///
/// # Example
///
/// ```rust
/// use brace_layout::{as_percentage, Canvas};
/// use emath::{pos2, Rect};
///
/// let mut canvas = Canvas::new();
/// let screen = canvas.add_root();
/// let sidebar = canvas.add_view(screen);
///
/// canvas
///     .anchor(sidebar)
///     .left(0.0)
///     .top(0.0)
///     .width(as_percentage(25.0))
///     .height(as_percentage(100.0));
///
/// let frames = canvas
///     .solve(screen, Rect::from_min_max(pos2(0.0, 0.0), pos2(800.0, 600.0)))
///     .unwrap();
/// let sidebar = frames.get(sidebar).unwrap();
/// assert!((sidebar.width() - 200.0).abs() < 1e-3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Canvas {
    tree: ViewTree,
    engine: CassowaryEngine,
}

impl Canvas {
    pub const fn new() -> Self {
        Self {
            tree: ViewTree::new(),
            engine: CassowaryEngine::new(),
        }
    }

    pub const fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub const fn engine(&self) -> &CassowaryEngine {
        &self.engine
    }

    pub fn add_root(&mut self) -> ViewId {
        self.tree.insert_root()
    }

    pub fn add_view(&mut self, parent: ViewId) -> ViewId {
        self.tree.insert_child(parent)
    }

    /// Adds a view outside of any container. Intents are translated when they are declared, so
    /// intents that need a container are dropped for good. Attaching the view later through
    /// [`Canvas::tree_mut`] only affects intents declared after that.
    pub fn add_detached_view(&mut self) -> ViewId {
        self.tree.insert_root()
    }

    /// Starts declaring intents for `view`.
    pub fn anchor(&mut self, view: ViewId) -> Anchor<'_, ViewTree, CassowaryEngine> {
        Anchor::new(view, &self.tree, &mut self.engine)
    }

    /// Pins `root` to `frame` and resolves every intent declared so far.
    ///
    /// # Errors
    ///
    /// See [`CassowaryEngine::solve`].
    pub fn solve(&mut self, root: ViewId, frame: Rect) -> Result<Frames, LayoutError> {
        self.engine.pin(root, frame);
        self.engine.solve()
    }
}
