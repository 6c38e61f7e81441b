use pumpkin_solver::results::ProblemSolution;
use pumpkin_solver::results::SolutionReference;

use crate::basic_types::Cell;
use crate::grid::VariableGrid;
use crate::variables::BoolVar;
use crate::variables::IntVar;
use crate::variables::Value;

/// The result of [`Model::solve`](super::Model::solve).
#[derive(Debug)]
pub enum SolveOutcome {
    Solved(Solution),
    /// The model is infeasible; this includes models which became infeasible while being built.
    NoSolution,
    /// The time limit was reached before the solver reached a conclusion.
    Unknown,
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            SolveOutcome::NoSolution | SolveOutcome::Unknown => None,
        }
    }
}

/// An assignment to every variable of a model.
#[derive(Clone, Debug)]
pub struct Solution(pumpkin_solver::results::Solution);

impl From<SolutionReference<'_>> for Solution {
    fn from(value: SolutionReference<'_>) -> Self {
        Solution(value.into())
    }
}

impl Solution {
    pub fn int_value(&self, var: IntVar) -> i32 {
        self.0.get_integer_value(var.view())
    }

    pub fn bool_value(&self, var: BoolVar) -> bool {
        self.0.get_literal_value(var.literal())
    }

    pub fn value(&self, value: impl Into<Value>) -> i32 {
        match value.into() {
            Value::Literal(value) => value,
            Value::Variable(var) => self.int_value(var),
        }
    }

    /// The cells of `grid` whose variable is true, in row-major order.
    pub fn true_cells(&self, grid: &VariableGrid<BoolVar>) -> Vec<Cell> {
        grid.iter()
            .filter(|&(_, var)| self.bool_value(var))
            .map(|(cell, _)| cell)
            .collect()
    }

    /// The value of every cell of `grid`, in row-major order.
    pub fn grid_values(&self, grid: &VariableGrid<IntVar>) -> Vec<(Cell, i32)> {
        grid.iter()
            .map(|(cell, var)| (cell, self.int_value(var)))
            .collect()
    }
}
