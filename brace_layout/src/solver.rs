use std::collections::{hash_map::Entry, HashMap};

use cassowary::{
    strength::REQUIRED,
    AddConstraintError, Expression, Solver, Term, Variable,
    WeightedRelation::{EQ, GE, LE},
};
use emath::{Pos2, Rect, Vec2};
use itertools::Itertools;

use crate::{
    Attribute, AttributeKind, ConstraintEngine, LayoutError, Relation, RelationKind, ViewId,
};

/// A [`ConstraintEngine`] that resolves relations with the [`cassowary`] solver.
///
/// Relations are only collected while intents are declared. [`CassowaryEngine::solve`] feeds
/// them to a fresh solver, in the order they were issued, and reads back one frame per view.
/// Every relation is required: there are no priorities, so relations that contradict each other
/// fail the solve instead of being traded off.
///
/// At least one view, usually the root, has to be pinned to a known frame for the percentages of
/// its descendants to resolve to anything but zero.
///
/// [`cassowary`]: https://crates.io/crates/cassowary
#[derive(Debug, Default, Clone)]
pub struct CassowaryEngine {
    pins: Vec<(ViewId, Rect)>,
    relations: Vec<Relation>,
}

impl ConstraintEngine for CassowaryEngine {
    fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }
}

impl CassowaryEngine {
    pub const fn new() -> Self {
        Self {
            pins: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Fixes the frame of `view`, replacing any frame it was pinned to before.
    pub fn pin(&mut self, view: ViewId, frame: Rect) {
        match self.pins.iter_mut().find(|(pinned, _)| *pinned == view) {
            Some((_, pinned_frame)) => *pinned_frame = frame,
            None => self.pins.push((view, frame)),
        }
    }

    /// The relations issued so far, in order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn clear(&mut self) {
        self.pins.clear();
        self.relations.clear();
    }

    /// Resolves the pinned frames and every issued relation into one frame per view.
    ///
    /// Only views mentioned by a pin or a relation get a frame. Attributes that nothing
    /// constrains resolve to zero.
    ///
    /// # Errors
    ///
    /// Returns the first relation the solver could not add, most commonly one that contradicts
    /// the relations issued before it.
    pub fn solve(&self) -> Result<Frames, LayoutError> {
        // Every solve starts from a fresh solver. Incremental edits would require tracking which
        // cassowary constraints belong to which relation.
        let mut solver = Solver::new();
        let mut variables: HashMap<ViewId, ViewVariables> = HashMap::new();

        let pinned = self
            .pins
            .iter()
            .flat_map(|&(view, frame)| pin_relations(view, frame));
        let relations = pinned.chain(self.relations.iter().copied()).collect_vec();

        tracing::debug!(
            pins = self.pins.len(),
            relations = self.relations.len(),
            "solving layout"
        );

        for relation in relations {
            configure_relation(&mut solver, &mut variables, relation)
                .map_err(|error| LayoutError::new(error, relation))?;
        }

        // `solver.fetch_changes()` can only be called once per solve
        let changes: HashMap<Variable, f64> = solver.fetch_changes().iter().copied().collect();
        let frames = variables
            .into_iter()
            .map(|(view, variables)| (view, variables.frame(&changes)))
            .collect();

        Ok(Frames { frames })
    }
}

/// `view.left == x`, `view.top == y`, `view.width == w`, `view.height == h`
fn pin_relations(view: ViewId, frame: Rect) -> [Relation; 4] {
    let pin = |kind, value: f32| {
        Relation::constant(view.attribute(kind), RelationKind::Equal, f64::from(value))
    };
    [
        pin(AttributeKind::Left, frame.min.x),
        pin(AttributeKind::Top, frame.min.y),
        pin(AttributeKind::Width, frame.width()),
        pin(AttributeKind::Height, frame.height()),
    ]
}

fn configure_relation(
    solver: &mut Solver,
    variables: &mut HashMap<ViewId, ViewVariables>,
    relation: Relation,
) -> Result<(), AddConstraintError> {
    let subject = variable(solver, variables, relation.subject)?;
    let rhs = match relation.reference {
        Some(reference) => Expression::new(
            vec![Term {
                variable: variable(solver, variables, reference)?,
                coefficient: relation.multiplier,
            }],
            relation.constant,
        ),
        None => Expression::from_constant(relation.constant),
    };

    let constraint = match relation.kind {
        RelationKind::Equal => subject | EQ(REQUIRED) | rhs,
        RelationKind::LessOrEqual => subject | LE(REQUIRED) | rhs,
        RelationKind::GreaterOrEqual => subject | GE(REQUIRED) | rhs,
    };
    solver.add_constraint(constraint)
}

/// Looks up the solver variable of `attribute`, creating the variables of its view on first use.
fn variable(
    solver: &mut Solver,
    variables: &mut HashMap<ViewId, ViewVariables>,
    attribute: Attribute,
) -> Result<Variable, AddConstraintError> {
    let view_variables = match variables.entry(attribute.view) {
        Entry::Occupied(entry) => *entry.get(),
        Entry::Vacant(entry) => {
            let view_variables = ViewVariables::new();
            view_variables.configure(solver)?;
            *entry.insert(view_variables)
        }
    };
    Ok(view_variables.get(attribute.kind))
}

/// The solver variables behind the six attributes of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewVariables {
    left: Variable,
    top: Variable,
    right: Variable,
    bottom: Variable,
    width: Variable,
    height: Variable,
}

impl ViewVariables {
    fn new() -> Self {
        Self {
            left: Variable::new(),
            top: Variable::new(),
            right: Variable::new(),
            bottom: Variable::new(),
            width: Variable::new(),
            height: Variable::new(),
        }
    }

    const fn get(&self, kind: AttributeKind) -> Variable {
        match kind {
            AttributeKind::Width => self.width,
            AttributeKind::Height => self.height,
            AttributeKind::Top => self.top,
            AttributeKind::Bottom => self.bottom,
            AttributeKind::Left => self.left,
            AttributeKind::Right => self.right,
        }
    }

    /// Ties the edges of the view to its size.
    ///
    /// ```plain
    /// left                right
    /// ┌──────width──────────┐ top
    /// │                     │
    /// │                   height
    /// └─────────────────────┘ bottom
    /// ```
    fn configure(&self, solver: &mut Solver) -> Result<(), AddConstraintError> {
        solver.add_constraint(self.right | EQ(REQUIRED) | self.left + self.width)?;
        solver.add_constraint(self.bottom | EQ(REQUIRED) | self.top + self.height)?;
        Ok(())
    }

    fn frame(&self, changes: &HashMap<Variable, f64>) -> Rect {
        let value = |variable: Variable| *changes.get(&variable).unwrap_or(&0.0) as f32;
        Rect::from_min_size(
            Pos2::new(value(self.left), value(self.top)),
            Vec2::new(value(self.width), value(self.height)),
        )
    }
}

/// The frames resolved by [`CassowaryEngine::solve`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frames {
    frames: HashMap<ViewId, Rect>,
}

impl Frames {
    pub fn get(&self, view: ViewId) -> Option<Rect> {
        self.frames.get(&view).copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Every resolved frame, ordered by view.
    pub fn iter(&self) -> impl Iterator<Item = (ViewId, Rect)> + '_ {
        self.frames
            .iter()
            .map(|(&view, &frame)| (view, frame))
            .sorted_by_key(|(view, _)| *view)
    }
}

#[cfg(test)]
mod tests {
    use emath::{pos2, vec2};
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{as_percentage, at_least, at_most, Canvas, ViewTree};

    struct Screen {
        canvas: Canvas,
        root: ViewId,
        view: ViewId,
    }

    #[fixture]
    fn screen() -> Screen {
        let mut canvas = Canvas::new();
        let root = canvas.add_root();
        let view = canvas.add_view(root);
        Screen { canvas, root, view }
    }

    const ROOT: Rect = Rect::from_min_max(Pos2::ZERO, Pos2::new(400.0, 200.0));

    #[track_caller]
    fn assert_frame(frame: Option<Rect>, [x, y, width, height]: [f32; 4]) {
        let frame = frame.expect("view should have a frame");
        let actual = [frame.min.x, frame.min.y, frame.width(), frame.height()];
        for (actual, expected) in actual.into_iter().zip([x, y, width, height]) {
            assert!(
                (actual - expected).abs() < 1e-3,
                "expected {:?}, got {frame:?}",
                [x, y, width, height]
            );
        }
    }

    #[rstest]
    fn root_keeps_its_frame(mut screen: Screen) {
        let frames = screen.canvas.solve(screen.root, ROOT).unwrap();
        assert_frame(frames.get(screen.root), [0.0, 0.0, 400.0, 200.0]);
    }

    #[rstest]
    fn percentages_of_the_container(mut screen: Screen) {
        screen
            .canvas
            .anchor(screen.view)
            .left(as_percentage(10.0))
            .width(as_percentage(50.0))
            .top(as_percentage(20.0))
            .height(as_percentage(25.0));
        let frames = screen.canvas.solve(screen.root, ROOT).unwrap();
        assert_frame(frames.get(screen.view), [40.0, 40.0, 200.0, 50.0]);
    }

    #[rstest]
    fn size(mut screen: Screen) {
        screen
            .canvas
            .anchor(screen.view)
            .size(as_percentage(50.0))
            .left(0.0)
            .top(0.0);
        let frames = screen.canvas.solve(screen.root, ROOT).unwrap();
        assert_frame(frames.get(screen.view), [0.0, 0.0, 200.0, 100.0]);
    }

    #[rstest]
    fn right_and_bottom_margins(mut screen: Screen) {
        screen
            .canvas
            .anchor(screen.view)
            .left(0.0)
            .right(as_percentage(25.0))
            .top(0.0)
            .bottom(as_percentage(10.0));
        let frames = screen.canvas.solve(screen.root, ROOT).unwrap();
        assert_frame(frames.get(screen.view), [0.0, 0.0, 300.0, 180.0]);
    }

    #[rstest]
    fn full_margins_flush_against_opposite_edges(mut screen: Screen) {
        screen
            .canvas
            .anchor(screen.view)
            .right(as_percentage(100.0))
            .width(50.0)
            .bottom(as_percentage(100.0))
            .height(20.0);
        let frames = screen.canvas.solve(screen.root, ROOT).unwrap();
        let frame = frames.get(screen.view);
        assert_frame(frame, [-50.0, -20.0, 50.0, 20.0]);
    }

    #[rstest]
    fn absolute_margins(mut screen: Screen) {
        screen
            .canvas
            .anchor(screen.view)
            .left(16.0)
            .right(16.0)
            .top(8.0)
            .bottom(at_least(8.0))
            .bottom(at_most(8.0));
        let frames = screen.canvas.solve(screen.root, ROOT).unwrap();
        assert_frame(frames.get(screen.view), [16.0, 8.0, 368.0, 184.0]);
    }

    #[rstest]
    fn bounded_widths(mut screen: Screen) {
        screen
            .canvas
            .anchor(screen.view)
            .width(at_least(150.0))
            .width(at_most(150.0))
            .height(at_least(10.0))
            .height(at_most(20.0))
            .left(0.0)
            .top(0.0);
        let frames = screen.canvas.solve(screen.root, ROOT).unwrap();
        let frame = frames.get(screen.view).unwrap();
        assert!((frame.width() - 150.0).abs() < 1e-3);
        assert!(frame.height() >= 10.0 - 1e-3 && frame.height() <= 20.0 + 1e-3);
    }

    #[rstest]
    fn percentages_use_the_immediate_container(mut screen: Screen) {
        let inner = screen.canvas.add_view(screen.view);
        screen
            .canvas
            .anchor(screen.view)
            .left(as_percentage(10.0))
            .width(as_percentage(50.0))
            .top(0.0)
            .height(as_percentage(100.0));
        screen
            .canvas
            .anchor(inner)
            .left(0.0)
            .width(as_percentage(50.0))
            .top(0.0)
            .height(as_percentage(50.0));
        let frames = screen.canvas.solve(screen.root, ROOT).unwrap();
        assert_frame(frames.get(inner), [40.0, 0.0, 100.0, 100.0]);
    }

    #[rstest]
    fn contradicting_relations_fail(mut screen: Screen) {
        screen
            .canvas
            .anchor(screen.view)
            .width(as_percentage(50.0))
            .width(120.0);
        let error = screen.canvas.solve(screen.root, ROOT).unwrap_err();
        assert_eq!(
            error,
            LayoutError::Unsatisfiable {
                relation: Relation::constant(
                    screen.view.attribute(AttributeKind::Width),
                    RelationKind::Equal,
                    120.0
                )
            }
        );
    }

    #[rstest]
    fn detached_views_get_no_frame(mut screen: Screen) {
        let detached = screen.canvas.add_detached_view();
        screen
            .canvas
            .anchor(detached)
            .size(as_percentage(50.0))
            .top(as_percentage(10.0));
        let frames = screen.canvas.solve(screen.root, ROOT).unwrap();
        assert_eq!(frames.get(detached), None);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn referenced_terms_carry_multiplier_and_constant() {
        let mut tree = ViewTree::new();
        let root = tree.insert_root();
        let view = tree.insert_child(root);

        let mut engine = CassowaryEngine::new();
        engine.pin(root, ROOT);
        engine.add_relation(Relation {
            subject: view.attribute(AttributeKind::Width),
            kind: RelationKind::Equal,
            reference: Some(root.attribute(AttributeKind::Width)),
            multiplier: 0.25,
            constant: 10.0,
        });
        engine.add_relation(Relation::scaled(
            view.attribute(AttributeKind::Height),
            root.attribute(AttributeKind::Height),
            0.5,
        ));
        engine.add_relation(Relation::offset(
            view.attribute(AttributeKind::Left),
            RelationKind::Equal,
            root.attribute(AttributeKind::Left),
            30.0,
        ));
        engine.add_relation(Relation::constant(
            view.attribute(AttributeKind::Top),
            RelationKind::Equal,
            5.0,
        ));

        let frames = engine.solve().unwrap();
        assert_frame(frames.get(view), [30.0, 5.0, 110.0, 100.0]);
    }

    #[test]
    fn repinning_replaces_the_frame() {
        let mut engine = CassowaryEngine::new();
        let root = ViewTree::new().insert_root();
        engine.pin(root, ROOT);
        engine.pin(root, Rect::from_min_size(pos2(10.0, 10.0), vec2(20.0, 30.0)));
        let frames = engine.solve().unwrap();
        assert_frame(frames.get(root), [10.0, 10.0, 20.0, 30.0]);

        engine.clear();
        assert!(engine.solve().unwrap().is_empty());
    }

    #[test]
    fn frames_are_ordered_by_view() {
        let mut canvas = Canvas::new();
        let root = canvas.add_root();
        let views = (0..5).map(|_| canvas.add_view(root)).collect_vec();
        for &view in views.iter().rev() {
            canvas.anchor(view).size(as_percentage(10.0));
        }
        let frames = canvas.solve(root, ROOT).unwrap();
        let ordered = frames.iter().map(|(view, _)| view).collect_vec();
        let mut expected = vec![root];
        expected.extend(views);
        assert_eq!(ordered, expected);
    }
}
