//! Predicates over lines of cells, built from the primitive [`encoders`](crate::encoders).
//!
//! Each predicate comes in an enforcing form and, where a rule may need to reason about it, an
//! `is_*` form returning a boolean equivalent to the predicate.
mod lines;
mod renban;
mod visibility;
mod whispers;
mod x_sum;

pub use lines::*;
pub use renban::*;
pub use visibility::*;
pub use whispers::*;
pub use x_sum::*;
