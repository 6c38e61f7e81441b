use super::and;
use super::bool_terms;
use super::exactly_one;
use super::linear_equal;
use super::or;
use super::weighted_sum;
use crate::basic_types::Bounds;
use crate::model::Model;
use crate::variables::AuxiliaryKind;
use crate::variables::BoolVar;
use crate::variables::IntVar;
use crate::variables::Value;

/// For every position, whether it holds the first true boolean of `bools`.
///
/// At most one of the returned booleans is true.
pub fn only_first_true(model: &mut Model, bools: &[BoolVar]) -> Vec<BoolVar> {
    let mut seen = model.false_bool();
    bools
        .iter()
        .map(|&var| {
            let first = and(model, &[var, !seen]);
            seen = or(model, &[seen, var]);
            first
        })
        .collect()
}

/// The position of the first true boolean of `bools`, or `bools.len()` if none is true.
pub fn index_of_first_true(model: &mut Model, bools: &[BoolVar]) -> IntVar {
    let mut indicators = only_first_true(model, bools);
    let none = !or(model, bools);
    indicators.push(none);
    exactly_one(model, &indicators);

    let terms = bool_terms(model, &indicators)
        .into_iter()
        .enumerate()
        .map(|(position, (_, value))| (position as i32, value))
        .collect::<Vec<_>>();
    if terms.iter().all(|(_, value)| value.as_literal().is_some()) {
        return weighted_sum(model, terms);
    }

    let index = model.new_auxiliary_int(AuxiliaryKind::Sum, Bounds::new(0, bools.len() as i32));
    linear_equal(
        model,
        terms.into_iter().chain([(-1, Value::from(index))]),
        0,
    );
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::all_true;
    use crate::model::SolveOutcome;

    #[test]
    fn constant_prefixes_are_resolved_while_building() {
        let mut model = Model::default();
        let (t, f) = (model.true_bool(), model.false_bool());
        let x = model.new_bool();

        assert_eq!(only_first_true(&mut model, &[f, t, x]), vec![f, t, f]);
        assert_eq!(
            index_of_first_true(&mut model, &[f, f, t]).bounds(),
            Bounds::fixed(2)
        );
    }

    #[test]
    fn index_is_length_when_nothing_is_true() {
        let mut model = Model::default();
        let bools = [model.new_bool(), model.new_bool()];
        let index = index_of_first_true(&mut model, &bools);
        all_true(&mut model, &[!bools[0], !bools[1]]);

        let SolveOutcome::Solved(solution) = model.solve() else {
            panic!("expected a solution");
        };
        assert_eq!(solution.int_value(index), 2);
    }
}
