use std::{fmt, str::FromStr};

use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    AttributeKind::{Bottom, Height, Left, Right, Top, Width},
    Constraint, ConstraintEngine, Hierarchy, Percentage, Relation, RelationKind, ViewId,
};

/// What a caller wants to say about a view's placement inside its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Width and height at once.
    Size,
    Width,
    Height,
    /// Distance between the container's top edge and the view's top edge.
    Top,
    /// Distance between the container's left edge and the view's left edge.
    Left,
    /// Distance between the view's right edge and the container's right edge.
    Right,
    /// Distance between the view's bottom edge and the container's bottom edge.
    Bottom,
}

impl Intent {
    pub const ALL: [Self; 7] = [
        Self::Size,
        Self::Width,
        Self::Height,
        Self::Top,
        Self::Left,
        Self::Right,
        Self::Bottom,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::Width => "width",
            Self::Height => "height",
            Self::Top => "top",
            Self::Left => "left",
            Self::Right => "right",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown layout intent `{0}`, expected one of size, width, height, top, left, right, bottom")]
pub struct ParseIntentError(String);

impl FromStr for Intent {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|intent| intent.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseIntentError(s.to_owned()))
    }
}

/// Translates `intent` on `view` into the relations to hand to a constraint engine.
///
/// Percentages are taken of the attribute of `container` listed below, `p` being the percentage
/// value:
///
/// ```plain
/// width   view.width  == container.width  * p/100
/// height  view.height == container.height * p/100
/// top     view.top    == container.bottom * p/100
/// left    view.left   == container.right  * p/100
/// right   view.right  == container.right  * (100-p)/100, or container.left when p is 100
/// bottom  view.bottom == container.bottom * (100-p)/100, or container.top  when p is 100
/// ```
///
/// Absolute margins are offsets from the matching container edge, measured inwards. Absolute
/// widths and heights don't need a container at all.
///
/// `size` yields the width relation followed by the height relation. Whenever a container is
/// needed and `container` is `None`, nothing is returned.
pub fn relations(
    intent: Intent,
    view: ViewId,
    container: Option<ViewId>,
    constraint: Constraint,
) -> SmallVec<[Relation; 2]> {
    match intent {
        Intent::Size => relation(Intent::Width, view, container, constraint)
            .into_iter()
            .chain(relation(Intent::Height, view, container, constraint))
            .collect(),
        _ => relation(intent, view, container, constraint)
            .into_iter()
            .collect(),
    }
}

fn relation(
    intent: Intent,
    view: ViewId,
    container: Option<ViewId>,
    constraint: Constraint,
) -> Option<Relation> {
    match constraint {
        Constraint::Percentage(p) => percentage_relation(intent, view, container?, p),
        Constraint::Exact(n) | Constraint::AtMost(n) | Constraint::AtLeast(n) => {
            absolute_relation(intent, view, container, constraint.relation_kind(), n)
        }
    }
}

fn percentage_relation(
    intent: Intent,
    view: ViewId,
    container: ViewId,
    p: Percentage,
) -> Option<Relation> {
    let relation = match intent {
        Intent::Width => Relation::scaled(
            view.attribute(Width),
            container.attribute(Width),
            p.multiplier(),
        ),
        Intent::Height => Relation::scaled(
            view.attribute(Height),
            container.attribute(Height),
            p.multiplier(),
        ),
        Intent::Top => Relation::scaled(
            view.attribute(Top),
            container.attribute(Bottom),
            p.multiplier(),
        ),
        Intent::Left => Relation::scaled(
            view.attribute(Left),
            container.attribute(Right),
            p.multiplier(),
        ),
        // At 100% the complement would scale by zero and no longer pin the edge, so the view is
        // placed flush against the opposite edge instead. Top and left have no such case.
        Intent::Right if p.is_full() => Relation::offset(
            view.attribute(Right),
            RelationKind::Equal,
            container.attribute(Left),
            0.0,
        ),
        Intent::Right => Relation::scaled(
            view.attribute(Right),
            container.attribute(Right),
            p.complement().multiplier(),
        ),
        Intent::Bottom if p.is_full() => Relation::offset(
            view.attribute(Bottom),
            RelationKind::Equal,
            container.attribute(Top),
            0.0,
        ),
        Intent::Bottom => Relation::scaled(
            view.attribute(Bottom),
            container.attribute(Bottom),
            p.complement().multiplier(),
        ),
        // expanded by `relations`
        Intent::Size => return None,
    };
    Some(relation)
}

fn absolute_relation(
    intent: Intent,
    view: ViewId,
    container: Option<ViewId>,
    kind: RelationKind,
    n: f64,
) -> Option<Relation> {
    let relation = match intent {
        Intent::Width => Relation::constant(view.attribute(Width), kind, n),
        Intent::Height => Relation::constant(view.attribute(Height), kind, n),
        Intent::Top => {
            Relation::offset(view.attribute(Top), kind, container?.attribute(Top), n)
        }
        Intent::Left => {
            Relation::offset(view.attribute(Left), kind, container?.attribute(Left), n)
        }
        // `container.right - view.right <kind> n`
        Intent::Right => Relation::offset(
            view.attribute(Right),
            kind.flip(),
            container?.attribute(Right),
            -n,
        ),
        Intent::Bottom => Relation::offset(
            view.attribute(Bottom),
            kind.flip(),
            container?.attribute(Bottom),
            -n,
        ),
        Intent::Size => return None,
    };
    Some(relation)
}

/// Declares layout intents for one view.
///
/// An anchor borrows the view's [`Hierarchy`] to find its container and the
/// [`ConstraintEngine`] that receives the resulting relations. It never owns the view. Every
/// intent returns the anchor so declarations chain:
///
/// ```rust
/// use brace_layout::{as_percentage, at_most, Anchor, Relation, ViewTree};
///
/// let mut tree = ViewTree::new();
/// let screen = tree.insert_root();
/// let card = tree.insert_child(screen);
///
/// let mut relations: Vec<Relation> = Vec::new();
/// let view = Anchor::new(card, &tree, &mut relations)
///     .width(as_percentage(80.0))
///     .height(at_most(200.0))
///     .top(as_percentage(10.0))
///     .view();
///
/// assert_eq!(view, card);
/// assert_eq!(relations.len(), 3);
/// ```
///
/// A view without a container silently ignores every intent that needs one, so intents can be
/// declared before the view is attached anywhere.
#[derive(Debug)]
pub struct Anchor<'a, H: ?Sized, E: ?Sized> {
    view: ViewId,
    hierarchy: &'a H,
    engine: &'a mut E,
}

impl<'a, H, E> Anchor<'a, H, E>
where
    H: Hierarchy + ?Sized,
    E: ConstraintEngine + ?Sized,
{
    pub fn new(view: ViewId, hierarchy: &'a H, engine: &'a mut E) -> Self {
        Self {
            view,
            hierarchy,
            engine,
        }
    }

    /// The view this anchor declares intents for.
    pub const fn view(&self) -> ViewId {
        self.view
    }

    /// Translates `intent` against the view's current container and issues the result.
    pub fn apply(self, intent: Intent, constraint: impl Into<Constraint>) -> Self {
        let constraint = constraint.into();
        let container = self.hierarchy.container(self.view);
        let relations = relations(intent, self.view, container, constraint);
        if relations.is_empty() {
            tracing::debug!(view = %self.view, %intent, %constraint, "view has no container, skipping");
        }
        for relation in relations {
            tracing::trace!(%relation, "issuing relation");
            self.engine.add_relation(relation);
        }
        self
    }

    /// Sets width and height, equivalent to `.width(c).height(c)`.
    ///
    /// ```plain
    /// image.size(100)
    /// image.size(100%)
    /// ```
    pub fn size(self, constraint: impl Into<Constraint>) -> Self {
        self.apply(Intent::Size, constraint)
    }

    /// Sets the view's width.
    ///
    /// ```plain
    /// image.width(100)
    /// image.width(<=100)
    /// image.width(>=100)
    /// image.width(100%)
    /// ```
    pub fn width(self, constraint: impl Into<Constraint>) -> Self {
        self.apply(Intent::Width, constraint)
    }

    /// Sets the view's height.
    pub fn height(self, constraint: impl Into<Constraint>) -> Self {
        self.apply(Intent::Height, constraint)
    }

    /// Sets the top margin.
    ///
    /// ```plain
    /// label.top(20)
    /// label.top(<=20)
    /// label.top(>=20)
    /// label.top(20%)
    /// ```
    pub fn top(self, constraint: impl Into<Constraint>) -> Self {
        self.apply(Intent::Top, constraint)
    }

    /// Sets the left margin.
    pub fn left(self, constraint: impl Into<Constraint>) -> Self {
        self.apply(Intent::Left, constraint)
    }

    /// Sets the right margin. `right(100%)` puts the view's right edge on the container's left
    /// edge.
    pub fn right(self, constraint: impl Into<Constraint>) -> Self {
        self.apply(Intent::Right, constraint)
    }

    /// Sets the bottom margin. `bottom(100%)` puts the view's bottom edge on the container's top
    /// edge.
    pub fn bottom(self, constraint: impl Into<Constraint>) -> Self {
        self.apply(Intent::Bottom, constraint)
    }
}
