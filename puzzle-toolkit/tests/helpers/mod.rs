//! Shared setup for the integration tests.
#![allow(
    dead_code,
    reason = "every test binary compiles its own copy and uses only some of the helpers"
)]

use std::collections::VecDeque;

use puzzle_toolkit::model::Solution;
use puzzle_toolkit::Cell;
use puzzle_toolkit::Model;
use puzzle_toolkit::SolveOutcome;

pub(crate) fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) fn solve(model: &mut Model) -> Solution {
    match model.solve() {
        SolveOutcome::Solved(solution) => solution,
        other => panic!("expected a solution, got {other:?}"),
    }
}

pub(crate) fn has_no_solution(model: &mut Model) -> bool {
    matches!(model.solve(), SolveOutcome::NoSolution)
}

/// Whether `cells` form a single non-empty orthogonally connected region, by breadth-first
/// search.
pub(crate) fn is_connected(cells: &[Cell]) -> bool {
    let Some(&start) = cells.first() else {
        return false;
    };

    let mut visited = vec![start];
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        for neighbour in cell.orthogonal_neighbours() {
            if cells.contains(&neighbour) && !visited.contains(&neighbour) {
                visited.push(neighbour);
                queue.push_back(neighbour);
            }
        }
    }

    visited.len() == cells.len()
}
