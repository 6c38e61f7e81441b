use itertools::Itertools;
use pumpkin_solver::constraints;

use super::and;
use super::count_equal;
use super::is_equal;
use super::is_not_equal;
use crate::model::Model;
use crate::variables::collect_values;
use crate::variables::BoolVar;
use crate::variables::Value;

/// Enforces that all elements of `values` are pairwise distinct.
pub fn all_different(model: &mut Model, values: impl IntoIterator<Item = impl Into<Value>>) {
    let views = collect_values(values)
        .into_iter()
        .map(|value| model.as_int_var(value).view())
        .collect::<Vec<_>>();
    if views.len() > 1 {
        model.post(|tag| constraints::all_different(views, tag));
    }
}

/// Whether all elements of `values` are pairwise distinct.
pub fn is_all_different(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
) -> BoolVar {
    let pairs = collect_values(values)
        .into_iter()
        .tuple_combinations()
        .map(|(a, b)| is_not_equal(model, a, b))
        .collect::<Vec<_>>();
    and(model, &pairs)
}

/// Whether `a` and `b` contain the same values with the same multiplicities.
pub fn compare_multisets(
    model: &mut Model,
    a: impl IntoIterator<Item = impl Into<Value>>,
    b: impl IntoIterator<Item = impl Into<Value>>,
) -> BoolVar {
    let (a, b) = (collect_values(a), collect_values(b));
    if a.len() != b.len() {
        return model.false_bool();
    }

    let checks = a
        .iter()
        .unique()
        .map(|&element| {
            let in_a = count_equal(model, &a, element);
            let in_b = count_equal(model, &b, element);
            is_equal(model, in_a, in_b)
        })
        .collect::<Vec<_>>();
    and(model, &checks)
}
