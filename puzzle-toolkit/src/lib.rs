//! # Puzzle toolkit
//! Constraint encodings for compiling pen-and-paper logic puzzles (sudoku variants, shading and
//! loop puzzles, ...) into constraint programming models solved by [Pumpkin](pumpkin_solver).
//!
//! A puzzle is compiled by a rule generator which walks over its rules and clues and calls into
//! this crate:
//! * the [`Model`](model::Model) owns the solver, the per-[`Layer`](grid::Layer) grids of
//!   decision variables, and a cache of resolved clue tokens (see
//!   [`Model::resolve`](model::Model::resolve));
//! * the [`encoders`] provide reified comparisons, boolean connectives, counting, membership,
//!   arithmetic and multiset encodings;
//! * the [`predicates`] build line rules such as renban, whispers, entropic and modular lines,
//!   skyscrapers and X-sums on top of the encoders;
//! * [`connectivity`] forces shaded regions or loops to be connected.
//!
//! # Example
//! A row of three cells holding the digits 1 to 3, in which exactly two skyscrapers are seen
//! from the left and the last cell is given by the clue `"<3"`:
//! ```rust
//! # use puzzle_toolkit::basic_types::rectangle;
//! # use puzzle_toolkit::encoders::all_different;
//! # use puzzle_toolkit::encoders::equal;
//! # use puzzle_toolkit::grid::Layer;
//! # use puzzle_toolkit::model::Model;
//! # use puzzle_toolkit::model::SolveOutcome;
//! # use puzzle_toolkit::predicates::skyscraper;
//! let mut model = Model::default();
//! let cells = rectangle(1, 3).collect::<Vec<_>>();
//! let values = model.add_int_layer(Layer::Values, cells.iter().copied(), 1, 3)?;
//! let row = values.line(&cells)?;
//!
//! all_different(&mut model, row.iter().copied());
//! let seen = skyscraper(&mut model, row.iter().copied());
//! equal(&mut model, seen, 2);
//!
//! let last = model.resolve("<3", 1, 3, "last cell")?;
//! equal(&mut model, row[2], last);
//!
//! let SolveOutcome::Solved(solution) = model.solve() else {
//!     panic!("the row has a solution");
//! };
//! let digits = row.iter().map(|&var| solution.int_value(var)).collect::<Vec<_>>();
//! assert!(digits == [1, 3, 2] || digits == [2, 3, 1]);
//! # Ok::<(), puzzle_toolkit::basic_types::ModelError>(())
//! ```
//!
//! # Errors and infeasibility
//! Malformed puzzle input (an unparsable clue, an empty domain, a missing layer, ...) is reported
//! as a [`ModelError`](basic_types::ModelError). A puzzle without a solution is not an error:
//! [`Model::solve`](model::Model::solve) returns
//! [`SolveOutcome::NoSolution`](model::SolveOutcome::NoSolution).
//!
//! # Logging
//! The crate logs through the [`log`] facade. Root-level infeasibility is logged at `debug`,
//! suspicious but legal input at `warn`, and [model statistics](model::Model::log_statistics) at
//! `info`.
pub mod basic_types;
pub mod connectivity;
pub mod containers;
pub mod encoders;
pub mod grid;
pub mod model;
pub mod predicates;
pub mod variables;

pub use crate::basic_types::Cell;
pub use crate::basic_types::ModelError;
pub use crate::basic_types::ModelResult;
pub use crate::model::Model;
pub use crate::model::SolveOutcome;
pub use crate::variables::BoolVar;
pub use crate::variables::IntVar;
pub use crate::variables::Value;
