//! Encodings which force the cells of a region to be connected.
//!
//! Connectivity is expressed by unrolling a breadth-first floodfill over a bounded number of
//! layers: a cell is part of the region exactly when the floodfill started from one of its cells
//! reaches it. See [`connected`] for the details.
mod floodfill;
mod loops;

pub use floodfill::*;
pub use loops::*;

use crate::basic_types::Cell;

/// How the layers of the floodfill relate to each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum FloodfillMode {
    /// A cell which is reached stays reached in every later layer.
    #[default]
    Monotone,
    /// A cell is reached in exactly one layer, its distance from the start of the floodfill.
    Exact,
}

/// The parameters of a connectivity encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectivityArgs {
    /// Upper bound on the number of cells in the region; also the number of floodfill layers.
    pub max_size: usize,
    /// A cell which is known to be part of the region.
    pub seed: Option<Cell>,
    pub mode: FloodfillMode,
}

impl ConnectivityArgs {
    pub fn new(max_size: usize) -> ConnectivityArgs {
        ConnectivityArgs {
            max_size,
            seed: None,
            mode: FloodfillMode::default(),
        }
    }

    pub fn with_seed(self, seed: Cell) -> ConnectivityArgs {
        ConnectivityArgs {
            seed: Some(seed),
            ..self
        }
    }

    pub fn with_mode(self, mode: FloodfillMode) -> ConnectivityArgs {
        ConnectivityArgs { mode, ..self }
    }
}
