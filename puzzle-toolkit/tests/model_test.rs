#![cfg(test)] // workaround for https://github.com/rust-lang/rust-clippy/issues/11024

mod helpers;

use std::time::Duration;

use helpers::init_logging;
use helpers::solve;
use puzzle_toolkit::basic_types::rectangle;
use puzzle_toolkit::encoders::all_different;
use puzzle_toolkit::encoders::equal;
use puzzle_toolkit::grid::Layer;
use puzzle_toolkit::model::ClueToken;
use puzzle_toolkit::model::ModelOptions;
use puzzle_toolkit::Cell;
use puzzle_toolkit::Model;
use puzzle_toolkit::ModelError;
use puzzle_toolkit::Value;

#[test]
fn equivalent_clues_resolve_to_one_variable() {
    init_logging();
    let mut model = Model::default();

    let first = model.resolve(">5", 1, 9, "a").expect("valid clue");
    let constraints = model.statistics().constraints;
    let second = model.resolve(" >5", 1, 9, "b").expect("valid clue");
    let third = model.resolve(">=6", 1, 9, "c").expect("valid clue");

    assert_eq!(first, second);
    assert_eq!(first, third);
    assert_eq!(model.statistics().constraints, constraints);
    assert_eq!(first.bounds().lb, 6);
}

#[test]
fn symbols_are_shared_between_clues() {
    init_logging();
    let mut model = Model::default();

    let x = model.resolve("x", 1, 9, "first").expect("valid clue");
    let options = model
        .resolve(ClueToken::from(vec!["x", "7"]), 1, 9, "second")
        .expect("valid clue");
    equal(&mut model, options, 3);

    let solution = solve(&mut model);
    assert_eq!(solution.value(x), 3);
    assert_eq!(model.describe(x), "$x");
}

#[test]
fn malformed_input_is_reported() {
    let mut model = Model::default();

    assert!(matches!(
        model.resolve(">x", 1, 9, "bad"),
        Err(ModelError::MalformedClue { .. })
    ));
    assert_eq!(
        model.resolve(">9", 1, 9, "empty"),
        Err(ModelError::EmptyDomain { lb: 10, ub: 9 })
    );
    assert_eq!(
        model.resolve(4, 5, 1, "reversed"),
        Err(ModelError::EmptyDomain { lb: 5, ub: 1 })
    );
    assert!(matches!(
        model.int_layer(Layer::Values),
        Err(ModelError::UnknownLayer(Layer::Values))
    ));

    let _ = model
        .add_bool_layer(Layer::Shading, rectangle(2, 2))
        .expect("fresh layer");
    assert!(matches!(
        model.add_int_layer(Layer::Shading, rectangle(2, 2), 1, 4),
        Err(ModelError::DuplicateLayer(Layer::Shading))
    ));
}

#[test]
fn latin_square_with_givens() {
    init_logging();
    let mut model = Model::new(ModelOptions {
        named_variables: true,
        time_limit: Some(Duration::from_secs(30)),
    });
    let values = model
        .add_int_layer(Layer::Values, rectangle(4, 4), 1, 4)
        .expect("fresh layer");

    for index in 0..4 {
        let row = (0..4).map(|col| Cell::new(index, col)).collect::<Vec<_>>();
        let col = (0..4).map(|row| Cell::new(row, index)).collect::<Vec<_>>();
        all_different(&mut model, values.line(&row).expect("cells of the grid"));
        all_different(&mut model, values.line(&col).expect("cells of the grid"));
    }
    for (cell, given) in [(Cell::new(0, 0), 1), (Cell::new(1, 1), 1), (Cell::new(0, 1), 2)] {
        let var = values.var(cell).expect("cell of the grid");
        let clue = model.resolve(given, 1, 4, "given").expect("valid clue");
        equal(&mut model, var, clue);
    }
    model.log_statistics();

    let solution = solve(&mut model);
    let grid = solution.grid_values(&values);
    assert_eq!(grid.len(), 16);
    assert_eq!(solution.int_value(values.var(Cell::new(0, 0)).expect("cell")), 1);
    for index in 0..4 {
        let mut row = grid
            .iter()
            .filter(|(cell, _)| cell.row == index)
            .map(|&(_, value)| value)
            .collect::<Vec<_>>();
        row.sort_unstable();
        assert_eq!(row, [1, 2, 3, 4]);
    }

    let top_left = values.var(Cell::new(0, 0)).expect("cell");
    assert_eq!(model.describe(top_left), "values[r0c0]");
    assert_eq!(model.describe(Value::Literal(7)), "7");
}
