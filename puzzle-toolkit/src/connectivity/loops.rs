use super::connected_by_edges;
use super::ConnectivityArgs;
use super::FloodfillMode;
use crate::basic_types::ModelResult;
use crate::encoders::bool_terms;
use crate::encoders::linear_equal;
use crate::grid::EdgeAdjacency;
use crate::grid::Layer;
use crate::grid::VariableGrid;
use crate::model::Model;
use crate::variables::BoolVar;
use crate::variables::Value;
use crate::variables::VariableTag;

/// Enforces that the true edges of `edges` form a single closed loop and returns the
/// [`Layer::Loop`] grid stating which cells the loop passes through.
///
/// Every cell has zero or two incident loop edges, and it is on the loop exactly when it has two.
/// The on-loop cells are connected through loop edges with an [`FloodfillMode::Exact`]
/// floodfill; the mode of `args` is ignored.
pub fn single_loop(
    model: &mut Model,
    edges: &EdgeAdjacency,
    args: ConnectivityArgs,
) -> ModelResult<VariableGrid<BoolVar>> {
    let adjacency = edges.adjacency();
    let mut on_loop = VariableGrid::new(Layer::Loop);

    for id in adjacency.ids() {
        let cell = adjacency.cell(id);
        let on = model.new_tagged_bool(VariableTag::Cell {
            layer: Layer::Loop,
            cell,
        });

        let incident = edges.incident(id).map(|(_, edge)| edge).collect::<Vec<_>>();
        let mut degree = bool_terms(model, &incident);
        degree.push((-2, Value::from(on)));
        linear_equal(model, degree, 0);

        let _ = on_loop.insert(cell, on);
    }

    let args = args.with_mode(FloodfillMode::Exact);
    connected_by_edges(model, &on_loop, edges, args)?;

    Ok(on_loop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::rectangle;
    use crate::basic_types::Cell;
    use crate::encoders::any_true;
    use crate::grid::Adjacency;
    use crate::model::SolveOutcome;

    #[test]
    fn loop_through_a_corner_of_a_two_by_three_grid() {
        let mut model = Model::default();
        let edges = EdgeAdjacency::new(&mut model, Adjacency::orthogonal(rectangle(2, 3)));
        let on_loop =
            single_loop(&mut model, &edges, ConnectivityArgs::new(6)).expect("valid arguments");

        let corner = on_loop.var(Cell::new(0, 2)).expect("cell of the loop layer");
        any_true(&mut model, &[corner]);

        let SolveOutcome::Solved(solution) = model.solve() else {
            panic!("expected a solution");
        };
        let cells = solution.true_cells(&on_loop);
        assert!(cells.len() == 4 || cells.len() == 6);
        assert!(cells.contains(&Cell::new(0, 2)));

        let loop_edges = edges
            .edges()
            .filter(|&(_, _, edge)| solution.bool_value(edge))
            .count();
        assert_eq!(loop_edges, cells.len());
    }

    #[test]
    fn two_separate_loops_are_rejected() {
        let mut model = Model::default();
        let edges = EdgeAdjacency::new(&mut model, Adjacency::orthogonal(rectangle(2, 5)));
        let on_loop =
            single_loop(&mut model, &edges, ConnectivityArgs::new(10)).expect("valid arguments");

        // Two 2x2 loops in the outer columns, with the middle column left empty.
        for cell in rectangle(2, 5) {
            let var = on_loop.var(cell).expect("cell of the loop layer");
            any_true(&mut model, &[if cell.col == 2 { !var } else { var }]);
        }

        assert!(matches!(model.solve(), SolveOutcome::NoSolution));
    }
}
