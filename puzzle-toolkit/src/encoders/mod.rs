//! Reusable boolean and arithmetic encodings.
//!
//! Every encoder is a free function taking the [`Model`] as its first argument. Encoders named
//! `is_*` (and the boolean connectives) return a [`BoolVar`](crate::variables::BoolVar) which is
//! equivalent to the encoded condition; the others either return a variable holding the result
//! of a computation or enforce the condition outright.
//!
//! Operands are anything convertible into a [`Value`]: encoders fold literal operands into the
//! constraints they post, and skip posting altogether when the bounds of the operands already
//! decide the outcome.
mod arithmetic;
mod counting;
mod membership;
mod multiset;
mod reification;
mod sequence;

pub use arithmetic::*;
pub use counting::*;
pub use membership::*;
pub use multiset::*;
use pumpkin_solver::variables::AffineView;
use pumpkin_solver::variables::DomainId;
pub use reification::*;
pub use sequence::*;

use crate::basic_types::Bounds;
#[cfg(doc)]
use crate::model::Model;
use crate::variables::Value;

/// `sum(weight * value) + constant`, with literal values folded into the constant.
#[derive(Clone, Debug)]
pub(crate) struct LinearTerms {
    views: Vec<AffineView<DomainId>>,
    /// Bounds of the variable part only.
    bounds: Bounds,
    constant: i32,
}

impl LinearTerms {
    pub(crate) fn new(terms: impl IntoIterator<Item = (i32, Value)>) -> LinearTerms {
        let mut views = Vec::new();
        let mut bounds = Bounds::fixed(0);
        let mut constant = 0;

        for (weight, value) in terms {
            if weight == 0 {
                continue;
            }
            match value {
                Value::Literal(value) => constant += weight * value,
                Value::Variable(var) => {
                    let scaled = var.scaled(weight);
                    views.push(scaled.view());
                    bounds = bounds.add(scaled.bounds());
                }
            }
        }

        LinearTerms {
            views,
            bounds,
            constant,
        }
    }

    /// Bounds of the whole expression.
    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds.offset(self.constant)
    }

    pub(crate) fn constant(&self) -> i32 {
        self.constant
    }

    pub(crate) fn is_constant(&self) -> bool {
        self.views.is_empty()
    }

    /// `rhs` with the constant moved to the right-hand side.
    pub(crate) fn rhs(&self, rhs: i32) -> i32 {
        rhs - self.constant
    }

    pub(crate) fn views(&self) -> Box<[AffineView<DomainId>]> {
        self.views.clone().into_boxed_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Model;

    #[test]
    fn literals_are_folded_into_the_constant() {
        let mut model = Model::default();
        let x = model.new_int(0, 5);
        let terms = LinearTerms::new([
            (2, Value::Literal(3)),
            (-1, Value::from(x)),
            (4, Value::Literal(-1)),
            (0, Value::from(x)),
        ]);

        assert_eq!(terms.rhs(10), 8);
        assert_eq!(terms.bounds(), Bounds::new(-3, 2));
        assert!(!terms.is_constant());
    }
}
