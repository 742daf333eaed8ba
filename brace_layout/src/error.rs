use cassowary::AddConstraintError;
use thiserror::Error;

use crate::Relation;

/// Why a set of relations could not be resolved into frames.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("cannot satisfy `{relation}` together with the relations before it")]
    Unsatisfiable { relation: Relation },
    #[error("`{relation}` was added twice")]
    Duplicate { relation: Relation },
    #[error("constraint solver failed while adding `{relation}`: {reason}")]
    Solver {
        relation: Relation,
        reason: &'static str,
    },
}

impl LayoutError {
    pub(crate) const fn new(error: AddConstraintError, relation: Relation) -> Self {
        match error {
            AddConstraintError::UnsatisfiableConstraint => Self::Unsatisfiable { relation },
            AddConstraintError::DuplicateConstraint => Self::Duplicate { relation },
            AddConstraintError::InternalSolverError(reason) => Self::Solver { relation, reason },
        }
    }

    /// The relation the solver was adding when it gave up.
    pub const fn relation(&self) -> &Relation {
        match self {
            Self::Unsatisfiable { relation }
            | Self::Duplicate { relation }
            | Self::Solver { relation, .. } => relation,
        }
    }
}
