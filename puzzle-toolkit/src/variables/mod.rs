//! Handles to the decision variables of a [`Model`](crate::model::Model).
//!
//! The handles are cheap to copy; the variables themselves live in the solver. Every handle
//! remembers the [`Bounds`] it was allocated with, which is what the encoders use to compute the
//! domains of derived variables.
mod names;

use std::ops::Not;

pub use names::*;
use pumpkin_solver::variables::AffineView;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::variables::Literal;
use pumpkin_solver::variables::TransformableVariable;

use crate::basic_types::Bounds;

/// An integer decision variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntVar {
    view: AffineView<DomainId>,
    bounds: Bounds,
}

impl IntVar {
    pub(crate) fn new(view: AffineView<DomainId>, bounds: Bounds) -> IntVar {
        IntVar { view, bounds }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn lb(&self) -> i32 {
        self.bounds.lb
    }

    pub fn ub(&self) -> i32 {
        self.bounds.ub
    }

    /// The variable `factor * self`.
    ///
    /// # Panics
    /// If `factor` is zero; use a constant instead.
    pub fn scaled(self, factor: i32) -> IntVar {
        assert_ne!(factor, 0, "cannot scale a variable by zero");
        IntVar {
            view: self.view.scaled(factor),
            bounds: self.bounds.scale(factor),
        }
    }

    /// The variable `self + offset`.
    pub fn offset(self, offset: i32) -> IntVar {
        IntVar {
            view: self.view.offset(offset),
            bounds: self.bounds.offset(offset),
        }
    }

    pub(crate) fn view(self) -> AffineView<DomainId> {
        self.view
    }
}

/// A boolean decision variable. Negation is free and yields another [`BoolVar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoolVar(Literal);

impl BoolVar {
    pub(crate) fn new(literal: Literal) -> BoolVar {
        BoolVar(literal)
    }

    pub(crate) fn literal(self) -> Literal {
        self.0
    }

    /// The 0/1 integer view of this boolean.
    pub fn as_int(self) -> IntVar {
        IntVar::new(self.0.get_integer_variable(), Bounds::boolean())
    }
}

impl Not for BoolVar {
    type Output = BoolVar;

    fn not(self) -> Self::Output {
        BoolVar(!self.0)
    }
}

/// An operand which is either known while the model is built or decided by the solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Literal(i32),
    Variable(IntVar),
}

impl Value {
    pub fn bounds(&self) -> Bounds {
        match self {
            Value::Literal(value) => Bounds::fixed(*value),
            Value::Variable(var) => var.bounds(),
        }
    }

    pub fn as_literal(&self) -> Option<i32> {
        match self {
            Value::Literal(value) => Some(*value),
            Value::Variable(_) => None,
        }
    }

    pub fn as_variable(&self) -> Option<IntVar> {
        match self {
            Value::Literal(_) => None,
            Value::Variable(var) => Some(*var),
        }
    }

    /// `self + offset`, without allocating anything.
    pub fn offset(self, offset: i32) -> Value {
        match self {
            Value::Literal(value) => Value::Literal(value + offset),
            Value::Variable(var) => Value::Variable(var.offset(offset)),
        }
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Literal(value)
    }
}

impl From<&i32> for Value {
    fn from(value: &i32) -> Self {
        Value::Literal(*value)
    }
}

impl From<IntVar> for Value {
    fn from(var: IntVar) -> Self {
        Value::Variable(var)
    }
}

impl From<&IntVar> for Value {
    fn from(var: &IntVar) -> Self {
        Value::Variable(*var)
    }
}

impl From<BoolVar> for Value {
    fn from(var: BoolVar) -> Self {
        Value::Variable(var.as_int())
    }
}

impl From<&Value> for Value {
    fn from(value: &Value) -> Self {
        *value
    }
}

pub(crate) fn collect_values(values: impl IntoIterator<Item = impl Into<Value>>) -> Vec<Value> {
    values.into_iter().map(Into::into).collect()
}
