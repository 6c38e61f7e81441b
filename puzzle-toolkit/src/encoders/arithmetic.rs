use pumpkin_solver::constraints;

use super::is_equal;
use super::is_linear_equal;
use super::less;
use super::linear_equal;
use super::or;
use super::LinearTerms;
use crate::basic_types::Bounds;
use crate::model::Model;
use crate::variables::collect_values;
use crate::variables::AuxiliaryKind;
use crate::variables::BoolVar;
use crate::variables::IntVar;
use crate::variables::Value;

/// The sum of `values`.
pub fn sum(model: &mut Model, values: impl IntoIterator<Item = impl Into<Value>>) -> IntVar {
    let terms = collect_values(values)
        .into_iter()
        .map(|value| (1, value))
        .collect::<Vec<_>>();
    weighted_sum(model, terms)
}

/// `sum(weight * value)`.
///
/// A sum over a single variable is expressed as a view of that variable instead of a new one.
pub fn weighted_sum(model: &mut Model, terms: impl IntoIterator<Item = (i32, Value)>) -> IntVar {
    let terms = terms
        .into_iter()
        .filter(|&(weight, _)| weight != 0)
        .collect::<Vec<_>>();
    let linear = LinearTerms::new(terms.iter().copied());
    if linear.is_constant() {
        return model.constant(linear.constant());
    }

    let variables = terms
        .iter()
        .filter_map(|&(weight, value)| Some((weight, value.as_variable()?)))
        .collect::<Vec<_>>();
    if let [(weight, var)] = variables.as_slice() {
        return var.scaled(*weight).offset(linear.constant());
    }

    let total = model.new_auxiliary_int(AuxiliaryKind::Sum, linear.bounds());
    linear_equal(
        model,
        terms.into_iter().chain([(-1, Value::from(total))]),
        0,
    );
    total
}

/// `a - b`.
pub fn difference(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) -> IntVar {
    weighted_sum(model, [(1, a.into()), (-1, b.into())])
}

/// The sum of the elements of `values` whose mask bit is true.
///
/// # Panics
/// If `values` and `mask` differ in length.
pub fn masked_sum(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    mask: &[BoolVar],
) -> IntVar {
    let values = collect_values(values);
    assert_eq!(
        values.len(),
        mask.len(),
        "a masked sum needs exactly one mask bit per value"
    );

    let mut terms = Vec::with_capacity(values.len());
    for (value, &bit) in values.into_iter().zip(mask) {
        match (model.fixed_bool(bit), value) {
            (Some(false), _) => {}
            (Some(true), value) => terms.push((1, value)),
            (None, Value::Literal(constant)) => terms.push((constant, Value::from(bit))),
            (None, Value::Variable(var)) => {
                let bounds = var.bounds().hull(Bounds::fixed(0));
                let term = model.new_auxiliary_int(AuxiliaryKind::MaskedTerm, bounds);
                model.post_implied(bit, |tag| {
                    constraints::binary_equals(term.view(), var.view(), tag)
                });
                model.post_implied(!bit, |tag| constraints::equals([term.view()], 0, tag));
                terms.push((1, Value::from(term)));
            }
        }
    }

    weighted_sum(model, terms)
}

/// `a * b`.
pub fn product(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) -> IntVar {
    match (a.into(), b.into()) {
        (Value::Literal(x), Value::Literal(y)) => model.constant(x * y),
        (Value::Literal(0), _) | (_, Value::Literal(0)) => model.constant(0),
        (Value::Literal(factor), Value::Variable(var))
        | (Value::Variable(var), Value::Literal(factor)) => var.scaled(factor),
        (Value::Variable(x), Value::Variable(y)) => {
            let result = model.new_auxiliary_int(AuxiliaryKind::Product, x.bounds().mul(y.bounds()));
            model.post(|tag| constraints::times(x.view(), y.view(), result.view(), tag));
            result
        }
    }
}

/// `sum(xs[i] * ys[i])`.
///
/// # Panics
/// If `xs` and `ys` differ in length.
pub fn scalar_product(
    model: &mut Model,
    xs: impl IntoIterator<Item = impl Into<Value>>,
    ys: impl IntoIterator<Item = impl Into<Value>>,
) -> IntVar {
    let (xs, ys) = (collect_values(xs), collect_values(ys));
    assert_eq!(
        xs.len(),
        ys.len(),
        "a scalar product needs vectors of equal length"
    );

    let terms = xs
        .into_iter()
        .zip(ys)
        .map(|pair| match pair {
            (Value::Literal(weight), value) | (value, Value::Literal(weight)) => (weight, value),
            (x, y) => (1, Value::from(product(model, x, y))),
        })
        .collect::<Vec<_>>();
    weighted_sum(model, terms)
}

/// `|a - b|`.
pub fn distance(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) -> IntVar {
    let diff = difference(model, a, b);
    if diff.lb() >= 0 {
        return diff;
    }
    if diff.ub() <= 0 {
        return diff.scaled(-1);
    }

    let result = model.new_auxiliary_int(AuxiliaryKind::Distance, diff.bounds().abs());
    model.post(|tag| constraints::absolute(diff.view(), result.view(), tag));
    result
}

/// Whether `a` and `b` differ by exactly one.
pub fn are_consecutive(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) -> BoolVar {
    let distance = distance(model, a, b);
    is_equal(model, distance, 1)
}

/// Whether one of `a` and `b` is `ratio` times the other.
pub fn is_ratio(
    model: &mut Model,
    a: impl Into<Value>,
    b: impl Into<Value>,
    ratio: impl Into<Value>,
) -> BoolVar {
    let (a, b, ratio) = (a.into(), b.into(), ratio.into());
    let forward = is_multiple(model, a, b, ratio);
    let backward = is_multiple(model, b, a, ratio);
    or(model, &[forward, backward])
}

/// `x = ratio * y`.
fn is_multiple(model: &mut Model, x: Value, y: Value, ratio: Value) -> BoolVar {
    match ratio {
        Value::Literal(ratio) => is_linear_equal(model, [(1, x), (-ratio, y)], 0),
        Value::Variable(_) => {
            let scaled = product(model, ratio, y);
            is_equal(model, x, scaled)
        }
    }
}

/// The Euclidean remainder of `a` divided by `modulus`, in `[0, modulus)`.
///
/// # Panics
/// If the modulus can be zero or negative, or if a variable modulus is combined with a dividend
/// which can be negative.
pub fn modulo(model: &mut Model, a: impl Into<Value>, modulus: impl Into<Value>) -> IntVar {
    match (a.into(), modulus.into()) {
        (_, Value::Literal(modulus)) if modulus <= 0 => {
            panic!("the modulus must be strictly positive, got {modulus}")
        }
        (Value::Literal(value), Value::Literal(modulus)) => {
            model.constant(value.rem_euclid(modulus))
        }
        (Value::Variable(var), Value::Literal(modulus)) => {
            let quotient_bounds = var.bounds().div_floor(modulus);
            if quotient_bounds.is_fixed() {
                return var.offset(-modulus * quotient_bounds.lb);
            }

            let quotient = model.new_auxiliary_int(AuxiliaryKind::Quotient, quotient_bounds);
            let remainder =
                model.new_auxiliary_int(AuxiliaryKind::Remainder, Bounds::new(0, modulus - 1));
            linear_equal(
                model,
                [
                    (1, Value::from(var)),
                    (-modulus, Value::from(quotient)),
                    (-1, Value::from(remainder)),
                ],
                0,
            );
            remainder
        }
        (dividend, Value::Variable(modulus)) => {
            assert!(modulus.lb() > 0, "the modulus must be strictly positive");
            assert!(
                dividend.bounds().lb >= 0,
                "a variable modulus needs a non-negative dividend"
            );

            let bounds = dividend.bounds();
            let quotient_bounds = Bounds::new(bounds.lb / modulus.ub(), bounds.ub / modulus.lb());
            let dividend = model.as_int_var(dividend);
            let quotient = model.new_auxiliary_int(AuxiliaryKind::Quotient, quotient_bounds);
            model.post(|tag| {
                constraints::division(dividend.view(), modulus.view(), quotient.view(), tag)
            });

            let multiple = product(model, quotient, modulus);
            let remainder =
                model.new_auxiliary_int(AuxiliaryKind::Remainder, Bounds::new(0, modulus.ub() - 1));
            linear_equal(
                model,
                [
                    (1, Value::from(dividend)),
                    (-1, Value::from(multiple)),
                    (-1, Value::from(remainder)),
                ],
                0,
            );
            less(model, remainder, modulus);
            remainder
        }
    }
}

/// Whether `a` and `b` have the same remainder modulo `modulus`.
pub fn same_remainder(
    model: &mut Model,
    a: impl Into<Value>,
    b: impl Into<Value>,
    modulus: impl Into<Value>,
) -> BoolVar {
    let modulus = modulus.into();
    let a = modulo(model, a, modulus);
    let b = modulo(model, b, modulus);
    is_equal(model, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::equal;
    use crate::model::SolveOutcome;

    #[test]
    fn sums_of_literals_are_constants() {
        let mut model = Model::default();

        let total = sum(&mut model, [1, 2, 3]);
        assert_eq!(total.bounds(), Bounds::fixed(6));
    }

    #[test]
    fn sums_of_a_single_variable_are_views() {
        let mut model = Model::default();
        let x = model.new_int(1, 4);
        let before = model.statistics().int_variables;

        let shifted = sum(&mut model, [Value::from(x), Value::Literal(10)]);
        assert_eq!(shifted.bounds(), Bounds::new(11, 14));
        assert_eq!(model.statistics().int_variables, before);
    }

    #[test]
    fn product_bounds_cover_mixed_signs() {
        let mut model = Model::default();
        let x = model.new_int(-2, 3);
        let y = model.new_int(-4, 1);

        assert_eq!(product(&mut model, x, y).bounds(), Bounds::new(-12, 8));
        assert_eq!(product(&mut model, x, 0).bounds(), Bounds::fixed(0));
    }

    #[test]
    fn literal_remainders_are_euclidean() {
        let mut model = Model::default();

        assert_eq!(modulo(&mut model, -7, 3).bounds(), Bounds::fixed(2));
        assert_eq!(modulo(&mut model, 7, 3).bounds(), Bounds::fixed(1));
    }

    #[test]
    #[should_panic(expected = "strictly positive")]
    fn zero_modulus_is_rejected() {
        let mut model = Model::default();
        let _ = modulo(&mut model, 4, 0);
    }

    #[test]
    fn remainders_of_variables_are_solved() {
        let mut model = Model::default();
        let x = model.new_int(-9, 9);
        let m = model.new_int(1, 5);
        let y = model.new_int(0, 20);
        let fixed_remainder = modulo(&mut model, x, 4);
        let variable_remainder = modulo(&mut model, y, m);
        equal(&mut model, x, -5);
        equal(&mut model, y, 17);
        equal(&mut model, m, 5);

        let SolveOutcome::Solved(solution) = model.solve() else {
            panic!("expected a solution");
        };
        assert_eq!(solution.int_value(fixed_remainder), 3);
        assert_eq!(solution.int_value(variable_remainder), 2);
    }

    #[test]
    fn distance_is_absolute() {
        let mut model = Model::default();
        let x = model.new_int(1, 9);
        let d = distance(&mut model, x, 7);
        equal(&mut model, x, 2);

        assert_eq!(d.bounds(), Bounds::new(0, 6));
        let solution = model.solve();
        assert_eq!(solution.solution().map(|s| s.int_value(d)), Some(5));
    }
}
