#![warn(clippy::missing_const_for_fn)]
//! Declares layout constraints as percentages of a view's container and translates them into
//! linear relations for a constraint solver.
//!
//! ```rust
//! use brace_layout::{as_percentage, Canvas};
//! use emath::{pos2, Rect};
//!
//! let mut canvas = Canvas::new();
//! let screen = canvas.add_root();
//! let card = canvas.add_view(screen);
//!
//! canvas
//!     .anchor(card)
//!     .left(as_percentage(10.0))
//!     .right(as_percentage(10.0))
//!     .top(as_percentage(20.0))
//!     .height(as_percentage(50.0));
//!
//! let frames = canvas
//!     .solve(screen, Rect::from_min_max(pos2(0.0, 0.0), pos2(400.0, 200.0)))
//!     .unwrap();
//! let card = frames.get(card).unwrap();
//! assert!((card.left() - 40.0).abs() < 1e-3);
//! assert!((card.right() - 360.0).abs() < 1e-3);
//! ```

mod anchor;
mod canvas;
mod constraint;
mod error;
mod percentage;
mod relation;
mod solver;
mod tree;

pub use anchor::{relations, Anchor, Intent, ParseIntentError};
pub use canvas::Canvas;
pub use constraint::{at_least, at_most, exactly, Constraint, ParseConstraintError};
pub use error::LayoutError;
pub use percentage::{as_percentage, Percent, Percentage};
pub use relation::{Attribute, AttributeKind, ConstraintEngine, Relation, RelationKind};
pub use solver::{CassowaryEngine, Frames};
pub use tree::{Hierarchy, ViewId, ViewTree};
