use thiserror::Error;

use super::Cell;
use crate::grid::Layer;
#[cfg(doc)]
use crate::model::Model;

/// Errors caused by a malformed puzzle definition or a malformed call into the [`Model`].
///
/// These are never recovered from; they indicate that the input or the rule generator is wrong.
/// Infeasibility of the model is not an error, see [`crate::model::SolveOutcome`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A clue token could not be parsed into any of the recognised shapes.
    #[error("malformed clue token '{token}': {reason}")]
    MalformedClue { token: String, reason: &'static str },
    /// The requested domain contains no values.
    #[error("the domain [{lb}, {ub}] is empty")]
    EmptyDomain { lb: i32, ub: i32 },
    /// A layer was created twice.
    #[error("the layer {0:?} already exists")]
    DuplicateLayer(Layer),
    /// A layer was requested before it was created.
    #[error("the layer {0:?} does not exist")]
    UnknownLayer(Layer),
    /// A cell was referenced which is not part of the grid.
    #[error("the cell {0} is not part of the grid")]
    MissingCell(Cell),
    /// The connectivity encoder was asked to unroll zero layers.
    #[error("the floodfill layer bound must be at least 1")]
    ZeroLayerBound,
    /// The connectivity seed is not one of the membership cells.
    #[error("the seed {0} is not part of the membership grid")]
    SeedOutsideGrid(Cell),
    /// A modulus or ratio which must be strictly positive was not.
    #[error("the modulus {0} must be strictly positive")]
    NonPositiveModulus(i32),
}

pub type ModelResult<T> = Result<T, ModelError>;
