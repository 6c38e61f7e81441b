mod bounds;
mod cell;
mod error;

pub use bounds::*;
pub use cell::*;
pub use error::*;
