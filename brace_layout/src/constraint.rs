use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::{Percentage, RelationKind};

/// The operand handed to a layout intent such as [`Anchor::width`](crate::Anchor::width).
///
/// A constraint is either an amount of absolute units, optionally bounded from one side, or a
/// [`Percentage`] of the container.
///
/// # Examples
///
/// `Constraint` converts from the values callers already have at hand, so intents accept them
/// directly.
///
/// ```rust
/// use brace_layout::{as_percentage, at_least, at_most, Constraint};
///
/// assert_eq!(Constraint::from(20.0), Constraint::Exact(20.0));
/// assert_eq!(at_most(20.0), Constraint::AtMost(20.0));
/// assert_eq!(at_least(20.0), Constraint::AtLeast(20.0));
/// assert_eq!(
///     Constraint::from(as_percentage(20.0)),
///     Constraint::Percentage(as_percentage(20.0))
/// );
///
/// // The textual forms round-trip
/// assert_eq!("<=20".parse::<Constraint>(), Ok(at_most(20.0)));
/// assert_eq!(at_least(20.0).to_string(), ">=20");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// The attribute equals the given amount of units.
    ///
    /// For margins the amount is the distance from the matching edge of the container.
    Exact(f64),

    /// The attribute is at most the given amount of units.
    ///
    /// For margins this bounds the distance from the matching edge of the container, so
    /// `right(at_most(20.0))` keeps the view within 20 units of the container's right edge.
    AtMost(f64),

    /// The attribute is at least the given amount of units.
    AtLeast(f64),

    /// The attribute is a fraction of the matching container attribute.
    ///
    /// ```plain
    /// width(50%)
    /// ┌────────────────────────────────────────────────┐
    /// │┌───────────────────────┐                       │
    /// ││         50%           │                       │
    /// │└───────────────────────┘                       │
    /// └────────────────────────────────────────────────┘
    /// ```
    Percentage(Percentage),
}

/// An exact amount of absolute units.
pub const fn exactly(n: f64) -> Constraint {
    Constraint::Exact(n)
}

/// An upper bound in absolute units, written `<=n`.
pub const fn at_most(n: f64) -> Constraint {
    Constraint::AtMost(n)
}

/// A lower bound in absolute units, written `>=n`.
pub const fn at_least(n: f64) -> Constraint {
    Constraint::AtLeast(n)
}

impl Constraint {
    /// How the constrained attribute relates to its operand.
    pub const fn relation_kind(self) -> RelationKind {
        match self {
            Self::Exact(_) | Self::Percentage(_) => RelationKind::Equal,
            Self::AtMost(_) => RelationKind::LessOrEqual,
            Self::AtLeast(_) => RelationKind::GreaterOrEqual,
        }
    }
}

impl From<f64> for Constraint {
    fn from(n: f64) -> Self {
        Self::Exact(n)
    }
}

impl From<Percentage> for Constraint {
    fn from(percentage: Percentage) -> Self {
        Self::Percentage(percentage)
    }
}

impl Default for Constraint {
    fn default() -> Self {
        Self::Percentage(Percentage::HUNDRED)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}"),
            Self::AtMost(n) => write!(f, "<={n}"),
            Self::AtLeast(n) => write!(f, ">={n}"),
            Self::Percentage(p) => write!(f, "{p}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseConstraintError {
    #[error("empty constraint")]
    Empty,
    #[error("`{0}` is not a number, expected forms like `20`, `<=20`, `>=20` or `20%`")]
    InvalidNumber(String),
}

impl FromStr for Constraint {
    type Err = ParseConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseConstraintError::Empty);
        }

        let number = |n: &str| {
            n.trim()
                .parse::<f64>()
                .map_err(|_| ParseConstraintError::InvalidNumber(s.to_owned()))
        };

        if let Some(n) = s.strip_prefix("<=") {
            Ok(Self::AtMost(number(n)?))
        } else if let Some(n) = s.strip_prefix(">=") {
            Ok(Self::AtLeast(number(n)?))
        } else if let Some(n) = s.strip_suffix('%') {
            Ok(Self::Percentage(Percentage::new(number(n)?)))
        } else {
            Ok(Self::Exact(number(s)?))
        }
    }
}
