use std::fmt;

use crate::ViewId;

/// The layout attributes every view exposes to the constraint engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Width,
    Height,
    Top,
    Bottom,
    Left,
    Right,
}

impl AttributeKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// An opaque reference to one attribute of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub view: ViewId,
    pub kind: AttributeKind,
}

impl Attribute {
    pub const fn new(view: ViewId, kind: AttributeKind) -> Self {
        Self { view, kind }
    }
}

impl ViewId {
    pub const fn attribute(self, kind: AttributeKind) -> Attribute {
        Attribute::new(self, kind)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.view, self.kind.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    Equal,
    LessOrEqual,
    GreaterOrEqual,
}

impl RelationKind {
    /// The relation seen from the other side of the inequality.
    pub const fn flip(self) -> Self {
        match self {
            Self::Equal => Self::Equal,
            Self::LessOrEqual => Self::GreaterOrEqual,
            Self::GreaterOrEqual => Self::LessOrEqual,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Equal => "==",
            Self::LessOrEqual => "<=",
            Self::GreaterOrEqual => ">=",
        })
    }
}

/// A linear relation requested from a [`ConstraintEngine`].
///
/// Reads as `subject <kind> reference * multiplier + constant`, or `subject <kind> constant` when
/// there is no reference attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation {
    pub subject: Attribute,
    pub kind: RelationKind,
    pub reference: Option<Attribute>,
    pub multiplier: f64,
    pub constant: f64,
}

impl Relation {
    /// `subject == reference * multiplier`
    pub const fn scaled(subject: Attribute, reference: Attribute, multiplier: f64) -> Self {
        Self {
            subject,
            kind: RelationKind::Equal,
            reference: Some(reference),
            multiplier,
            constant: 0.0,
        }
    }

    /// `subject <kind> reference + constant`
    pub const fn offset(
        subject: Attribute,
        kind: RelationKind,
        reference: Attribute,
        constant: f64,
    ) -> Self {
        Self {
            subject,
            kind,
            reference: Some(reference),
            multiplier: 1.0,
            constant,
        }
    }

    /// `subject <kind> constant`
    pub const fn constant(subject: Attribute, kind: RelationKind, constant: f64) -> Self {
        Self {
            subject,
            kind,
            reference: None,
            multiplier: 0.0,
            constant,
        }
    }

    /// Every view this relation mentions.
    pub fn views(&self) -> impl Iterator<Item = ViewId> {
        std::iter::once(self.subject.view).chain(self.reference.map(|r| r.view))
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reference {
            Some(reference) => write!(
                f,
                "{} {} {} * {} + {}",
                self.subject, self.kind, reference, self.multiplier, self.constant
            ),
            None => write!(f, "{} {} {}", self.subject, self.kind, self.constant),
        }
    }
}

/// The constraint engine that receives the relations produced by an
/// [`Anchor`](crate::Anchor).
///
/// Issuing a relation never fails. An engine that cannot satisfy its relations reports that
/// when it resolves them, see [`CassowaryEngine::solve`](crate::CassowaryEngine::solve).
pub trait ConstraintEngine {
    fn add_relation(&mut self, relation: Relation);
}

/// Records relations in the order they were issued.
impl ConstraintEngine for Vec<Relation> {
    fn add_relation(&mut self, relation: Relation) {
        self.push(relation);
    }
}

impl<E: ConstraintEngine + ?Sized> ConstraintEngine for &mut E {
    fn add_relation(&mut self, relation: Relation) {
        (**self).add_relation(relation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ViewTree;

    #[test]
    fn to_string() {
        let mut tree = ViewTree::new();
        let container = tree.insert_root();
        let view = tree.insert_child(container);

        let scaled = Relation::scaled(
            view.attribute(AttributeKind::Width),
            container.attribute(AttributeKind::Width),
            0.5,
        );
        assert_eq!(scaled.to_string(), "view#1.width == view#0.width * 0.5 + 0");

        let offset = Relation::offset(
            view.attribute(AttributeKind::Right),
            RelationKind::GreaterOrEqual,
            container.attribute(AttributeKind::Right),
            -20.0,
        );
        assert_eq!(offset.to_string(), "view#1.right >= view#0.right * 1 + -20");

        let constant = Relation::constant(
            view.attribute(AttributeKind::Height),
            RelationKind::LessOrEqual,
            100.0,
        );
        assert_eq!(constant.to_string(), "view#1.height <= 100");
    }

    #[test]
    fn views() {
        let mut tree = ViewTree::new();
        let container = tree.insert_root();
        let view = tree.insert_child(container);

        let scaled = Relation::scaled(
            view.attribute(AttributeKind::Top),
            container.attribute(AttributeKind::Bottom),
            0.2,
        );
        assert_eq!(scaled.views().collect::<Vec<_>>(), vec![view, container]);

        let constant =
            Relation::constant(view.attribute(AttributeKind::Width), RelationKind::Equal, 1.0);
        assert_eq!(constant.views().collect::<Vec<_>>(), vec![view]);
    }

    #[test]
    fn flip() {
        assert_eq!(RelationKind::Equal.flip(), RelationKind::Equal);
        assert_eq!(RelationKind::LessOrEqual.flip(), RelationKind::GreaterOrEqual);
        assert_eq!(RelationKind::GreaterOrEqual.flip(), RelationKind::LessOrEqual);
    }

    #[test]
    fn vec_records_in_order() {
        let mut tree = ViewTree::new();
        let view = tree.insert_root();
        let first = Relation::constant(view.attribute(AttributeKind::Width), RelationKind::Equal, 1.0);
        let second =
            Relation::constant(view.attribute(AttributeKind::Height), RelationKind::Equal, 2.0);

        fn issue<E: ConstraintEngine>(mut engine: E, relation: Relation) {
            engine.add_relation(relation);
        }

        let mut relations: Vec<Relation> = Vec::new();
        issue(&mut relations, first);
        issue(&mut relations, second);
        assert_eq!(relations, vec![first, second]);
    }
}
