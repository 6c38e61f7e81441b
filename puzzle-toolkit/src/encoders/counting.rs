use super::any_true;
use super::is_equal;
use super::is_linear_equal;
use super::is_linear_less_or_equal;
use super::linear_equal;
use super::linear_less_or_equal;
use crate::basic_types::Bounds;
use crate::model::Model;
use crate::variables::collect_values;
use crate::variables::AuxiliaryKind;
use crate::variables::BoolVar;
use crate::variables::IntVar;
use crate::variables::Value;

/// The number of true booleans in `bools`.
pub fn count_true(model: &mut Model, bools: &[BoolVar]) -> IntVar {
    let terms = bool_terms(model, bools);
    let known = terms.iter().filter_map(|(_, value)| value.as_literal()).sum::<i32>();
    let unknown = terms.iter().filter(|(_, value)| value.as_literal().is_none()).count() as i32;

    let count = model.new_auxiliary_int(AuxiliaryKind::Count, Bounds::new(known, known + unknown));
    if unknown > 0 {
        linear_equal(
            model,
            terms.into_iter().chain([(-1, Value::from(count))]),
            0,
        );
    }
    count
}

/// The number of elements of `values` equal to `target`, in `[0, values.len()]`.
pub fn count_equal(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    target: impl Into<Value>,
) -> IntVar {
    let target = target.into();
    let bools = collect_values(values)
        .into_iter()
        .map(|value| is_equal(model, value, target))
        .collect::<Vec<_>>();
    count_true(model, &bools)
}

/// Enforces that exactly one of `bools` is true.
pub fn exactly_one(model: &mut Model, bools: &[BoolVar]) {
    let terms = bool_terms(model, bools);
    linear_equal(model, terms, 1);
}

/// Enforces that at most one of `bools` is true.
pub fn at_most_one(model: &mut Model, bools: &[BoolVar]) {
    let terms = bool_terms(model, bools);
    linear_less_or_equal(model, terms, 1);
}

/// Enforces that at least one of `bools` is true.
pub fn at_least_one(model: &mut Model, bools: &[BoolVar]) {
    any_true(model, bools);
}

/// Whether exactly one of `bools` is true.
pub fn is_exactly_one(model: &mut Model, bools: &[BoolVar]) -> BoolVar {
    let terms = bool_terms(model, bools);
    is_linear_equal(model, terms, 1)
}

/// Whether at most one of `bools` is true.
pub fn is_at_most_one(model: &mut Model, bools: &[BoolVar]) -> BoolVar {
    let terms = bool_terms(model, bools);
    is_linear_less_or_equal(model, terms, 1)
}

/// Unit-weight linear terms for `bools`, with constant booleans as literals.
pub(crate) fn bool_terms(model: &Model, bools: &[BoolVar]) -> Vec<(i32, Value)> {
    bools
        .iter()
        .map(|&var| (1, bool_value(model, var)))
        .collect()
}

pub(crate) fn bool_value(model: &Model, var: BoolVar) -> Value {
    match model.fixed_bool(var) {
        Some(value) => Value::Literal(i32::from(value)),
        None => Value::from(var),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::all_true;
    use crate::model::SolveOutcome;

    #[test]
    fn counting_constants_needs_no_variables() {
        let mut model = Model::default();
        let count = count_equal(&mut model, [1, 2, 1, 1], 1);

        assert_eq!(count.bounds(), Bounds::fixed(3));
        assert_eq!(model.statistics().bool_variables, 0);
    }

    #[test]
    fn count_is_bounded_by_the_number_of_unknowns() {
        let mut model = Model::default();
        let bools = [model.new_bool(), model.new_bool(), model.true_bool()];
        let count = count_true(&mut model, &bools);

        assert_eq!(count.bounds(), Bounds::new(1, 3));
    }

    #[test]
    fn exactly_one_excludes_the_rest() {
        let mut model = Model::default();
        let bools = [model.new_bool(), model.new_bool(), model.new_bool()];
        exactly_one(&mut model, &bools);
        all_true(&mut model, &bools[..1]);

        let SolveOutcome::Solved(solution) = model.solve() else {
            panic!("expected a solution");
        };
        assert!(solution.bool_value(bools[0]));
        assert!(!solution.bool_value(bools[1]));
        assert!(!solution.bool_value(bools[2]));
    }
}
