use super::and;
use super::any_true;
use super::is_equal;
use super::is_less_or_equal;
use super::or;
use crate::model::Model;
use crate::variables::collect_values;
use crate::variables::BoolVar;
use crate::variables::Value;

/// Whether `value` equals one of the elements of `set`.
pub fn is_member_of(
    model: &mut Model,
    set: impl IntoIterator<Item = impl Into<Value>>,
    value: impl Into<Value>,
) -> BoolVar {
    let matches = element_matches(model, set, value.into());
    or(model, &matches)
}

/// Enforces that `value` equals one of the elements of `set`.
pub fn member_of(
    model: &mut Model,
    set: impl IntoIterator<Item = impl Into<Value>>,
    value: impl Into<Value>,
) {
    let matches = element_matches(model, set, value.into());
    any_true(model, &matches);
}

/// Whether `lb <= value <= ub`.
pub fn is_in_interval(
    model: &mut Model,
    value: impl Into<Value>,
    lb: impl Into<Value>,
    ub: impl Into<Value>,
) -> BoolVar {
    let value = value.into();
    let above = is_less_or_equal(model, lb, value);
    let below = is_less_or_equal(model, value, ub);
    and(model, &[above, below])
}

fn element_matches(
    model: &mut Model,
    set: impl IntoIterator<Item = impl Into<Value>>,
    value: Value,
) -> Vec<BoolVar> {
    collect_values(set)
        .into_iter()
        .map(|element| is_equal(model, value, element))
        .collect()
}
