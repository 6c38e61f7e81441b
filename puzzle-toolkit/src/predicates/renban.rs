use pumpkin_solver::constraints;

use crate::basic_types::Bounds;
use crate::encoders::all_different;
use crate::encoders::and;
use crate::encoders::is_all_different;
use crate::encoders::is_linear_equal;
use crate::encoders::linear_equal;
use crate::model::Model;
use crate::variables::collect_values;
use crate::variables::AuxiliaryKind;
use crate::variables::BoolVar;
use crate::variables::IntVar;
use crate::variables::Value;

/// Enforces that `values` is a set of distinct consecutive integers in any order, returning the
/// minimum and maximum of the run.
///
/// # Panics
/// If `values` is empty.
pub fn renban(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
) -> (IntVar, IntVar) {
    let values = collect_values(values);
    all_different(model, &values);

    let (min, max) = extremes(model, &values);
    linear_equal(
        model,
        [(1, Value::from(max)), (-1, Value::from(min))],
        values.len() as i32 - 1,
    );
    (min, max)
}

/// Whether `values` is a set of distinct consecutive integers.
///
/// # Panics
/// If `values` is empty.
pub fn is_renban(model: &mut Model, values: impl IntoIterator<Item = impl Into<Value>>) -> BoolVar {
    let values = collect_values(values);
    let distinct = is_all_different(model, &values);

    let (min, max) = extremes(model, &values);
    let spans_the_run = is_linear_equal(
        model,
        [(1, Value::from(max)), (-1, Value::from(min))],
        values.len() as i32 - 1,
    );
    and(model, &[distinct, spans_the_run])
}

/// Variables equal to the minimum and maximum of `values`.
fn extremes(model: &mut Model, values: &[Value]) -> (IntVar, IntVar) {
    assert!(!values.is_empty(), "a run needs at least one cell");

    let first = values[0].bounds();
    let (min_bounds, max_bounds) = values.iter().skip(1).map(Value::bounds).fold(
        (first, first),
        |(min, max), next| {
            (
                Bounds::new(min.lb.min(next.lb), min.ub.min(next.ub)),
                Bounds::new(max.lb.max(next.lb), max.ub.max(next.ub)),
            )
        },
    );

    let min = model.new_auxiliary_int(AuxiliaryKind::Extremum, min_bounds);
    let max = model.new_auxiliary_int(AuxiliaryKind::Extremum, max_bounds);
    if min_bounds.is_fixed() && max_bounds.is_fixed() {
        return (min, max);
    }

    let views = values
        .iter()
        .map(|&value| model.as_int_var(value).view())
        .collect::<Vec<_>>();
    model.post(|tag| constraints::minimum(views.clone(), min.view(), tag));
    model.post(|tag| constraints::maximum(views, max.view(), tag));

    (min, max)
}
