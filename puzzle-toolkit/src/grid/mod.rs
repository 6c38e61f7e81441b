//! Per-layer variable grids and the adjacency structures connectivity is proven over.
mod adjacency;
mod variable_grid;

use std::fmt::Display;
use std::fmt::Formatter;

pub use adjacency::*;
pub use variable_grid::*;

/// Identifies one grid of decision variables of a puzzle.
///
/// A puzzle usually has a [`Layer::Values`] grid of digits; shading puzzles add a boolean
/// [`Layer::Shading`] grid, region puzzles a [`Layer::Regions`] grid of region indices, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Values,
    Shading,
    Regions,
    Loop,
    Custom(u16),
}

impl Display for Layer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Values => write!(f, "values"),
            Layer::Shading => write!(f, "shading"),
            Layer::Regions => write!(f, "regions"),
            Layer::Loop => write!(f, "loop"),
            Layer::Custom(index) => write!(f, "layer{index}"),
        }
    }
}
