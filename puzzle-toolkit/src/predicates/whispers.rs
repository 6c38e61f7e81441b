use itertools::Itertools;

use crate::encoders::and;
use crate::encoders::distance;
use crate::encoders::is_less_or_equal;
use crate::encoders::less_or_equal;
use crate::model::Model;
use crate::variables::collect_values;
use crate::variables::BoolVar;
use crate::variables::Value;

/// Enforces that neighbouring elements of `values` differ by at least `min_distance`.
pub fn whispers(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    min_distance: impl Into<Value>,
) {
    let min_distance = min_distance.into();
    for (a, b) in collect_values(values).into_iter().tuple_windows() {
        let distance = distance(model, a, b);
        less_or_equal(model, min_distance, distance);
    }
}

/// Whether neighbouring elements of `values` differ by at least `min_distance`.
pub fn is_whispers(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    min_distance: impl Into<Value>,
) -> BoolVar {
    let min_distance = min_distance.into();
    let pairs = collect_values(values)
        .into_iter()
        .tuple_windows()
        .map(|(a, b)| {
            let distance = distance(model, a, b);
            is_less_or_equal(model, min_distance, distance)
        })
        .collect::<Vec<_>>();
    and(model, &pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SolveOutcome;

    #[test]
    fn german_whispers_skip_the_middle() {
        let mut model = Model::default();
        let x = model.new_int(1, 9);
        whispers(&mut model, [Value::Literal(1), Value::from(x), Value::Literal(2)], 5);

        let SolveOutcome::Solved(solution) = model.solve() else {
            panic!("expected a solution");
        };
        assert!(solution.int_value(x) >= 7);
    }

    #[test]
    fn reified_whispers_of_literals_are_decided() {
        let mut model = Model::default();

        assert_eq!(is_whispers(&mut model, [1, 6, 1], 5), model.true_bool());
        assert_eq!(is_whispers(&mut model, [1, 6, 2], 5), model.false_bool());
    }
}
