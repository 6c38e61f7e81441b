use pumpkin_solver::constraints;
use pumpkin_solver::variables::Literal;

use super::LinearTerms;
use crate::model::Model;
use crate::variables::AuxiliaryKind;
use crate::variables::BoolVar;
use crate::variables::Value;
use crate::variables::VariableTag;

/// `a = b`.
pub fn is_equal(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) -> BoolVar {
    let (a, b) = (a.into(), b.into());
    if a == b {
        return model.true_bool();
    }

    match (a, b) {
        (Value::Variable(x), Value::Variable(y)) if x.bounds().intersect(y.bounds()).is_some() => {
            let reified = model.new_auxiliary_bool(AuxiliaryKind::Equality);
            model.post_reified(reified, |tag| {
                constraints::binary_equals(x.view(), y.view(), tag)
            });
            reified
        }
        _ => is_linear_equal(model, [(1, a), (-1, b)], 0),
    }
}

/// `a != b`.
pub fn is_not_equal(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) -> BoolVar {
    !is_equal(model, a, b)
}

/// `a <= b`.
pub fn is_less_or_equal(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) -> BoolVar {
    is_linear_less_or_equal(model, [(1, a.into()), (-1, b.into())], 0)
}

/// `a < b`.
pub fn is_less(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) -> BoolVar {
    is_linear_less_or_equal(model, [(1, a.into()), (-1, b.into())], -1)
}

/// `a >= b`.
pub fn is_greater_or_equal(
    model: &mut Model,
    a: impl Into<Value>,
    b: impl Into<Value>,
) -> BoolVar {
    is_less_or_equal(model, b, a)
}

/// Enforces `a = b`.
pub fn equal(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) {
    let (a, b) = (a.into(), b.into());
    match (a, b) {
        (Value::Variable(x), Value::Variable(y)) if x != y => {
            model.post(|tag| constraints::binary_equals(x.view(), y.view(), tag));
        }
        _ => linear_equal(model, [(1, a), (-1, b)], 0),
    }
}

/// Enforces `a != b`.
pub fn not_equal(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) {
    let (a, b) = (a.into(), b.into());
    let terms = LinearTerms::new([(1, a), (-1, b)]);
    if !terms.bounds().contains(0) {
        return;
    }
    if terms.bounds().is_fixed() {
        model.mark_infeasible(format_args!("{a:?} != {b:?} with equal operands"));
        return;
    }

    match (a, b) {
        (Value::Variable(x), Value::Variable(y)) => {
            model.post(|tag| constraints::binary_not_equals(x.view(), y.view(), tag));
        }
        _ => {
            let (views, rhs) = (terms.views(), terms.rhs(0));
            model.post(|tag| constraints::not_equals(views, rhs, tag));
        }
    }
}

/// Enforces `a <= b`.
pub fn less_or_equal(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) {
    linear_less_or_equal(model, [(1, a.into()), (-1, b.into())], 0);
}

/// Enforces `a < b`.
pub fn less(model: &mut Model, a: impl Into<Value>, b: impl Into<Value>) {
    linear_less_or_equal(model, [(1, a.into()), (-1, b.into())], -1);
}

/// `sum(weight * value) = rhs`.
pub(crate) fn is_linear_equal(
    model: &mut Model,
    terms: impl IntoIterator<Item = (i32, Value)>,
    rhs: i32,
) -> BoolVar {
    let terms = LinearTerms::new(terms);
    let bounds = terms.bounds();
    if !bounds.contains(rhs) {
        return model.false_bool();
    }
    if bounds.is_fixed() {
        return model.true_bool();
    }

    let reified = model.new_auxiliary_bool(AuxiliaryKind::Equality);
    let (views, rhs) = (terms.views(), terms.rhs(rhs));
    model.post_reified(reified, |tag| constraints::equals(views, rhs, tag));
    reified
}

/// `sum(weight * value) <= rhs`.
pub(crate) fn is_linear_less_or_equal(
    model: &mut Model,
    terms: impl IntoIterator<Item = (i32, Value)>,
    rhs: i32,
) -> BoolVar {
    let terms = LinearTerms::new(terms);
    let bounds = terms.bounds();
    if bounds.ub <= rhs {
        return model.true_bool();
    }
    if bounds.lb > rhs {
        return model.false_bool();
    }

    let reified = model.new_auxiliary_bool(AuxiliaryKind::Comparison);
    let (views, rhs) = (terms.views(), terms.rhs(rhs));
    model.post_reified(reified, |tag| {
        constraints::less_than_or_equals(views, rhs, tag)
    });
    reified
}

/// Enforces `sum(weight * value) = rhs`.
pub(crate) fn linear_equal(
    model: &mut Model,
    terms: impl IntoIterator<Item = (i32, Value)>,
    rhs: i32,
) {
    let terms = LinearTerms::new(terms);
    let bounds = terms.bounds();
    if !bounds.contains(rhs) {
        model.mark_infeasible(format_args!("linear sum in {bounds} cannot equal {rhs}"));
        return;
    }
    if bounds.is_fixed() {
        return;
    }

    let (views, rhs) = (terms.views(), terms.rhs(rhs));
    model.post(|tag| constraints::equals(views, rhs, tag));
}

/// Enforces `sum(weight * value) <= rhs`.
pub(crate) fn linear_less_or_equal(
    model: &mut Model,
    terms: impl IntoIterator<Item = (i32, Value)>,
    rhs: i32,
) {
    let terms = LinearTerms::new(terms);
    let bounds = terms.bounds();
    if bounds.ub <= rhs {
        return;
    }
    if bounds.lb > rhs {
        model.mark_infeasible(format_args!("linear sum in {bounds} cannot be at most {rhs}"));
        return;
    }

    let (views, rhs) = (terms.views(), terms.rhs(rhs));
    model.post(|tag| constraints::less_than_or_equals(views, rhs, tag));
}

/// The conjunction of `bools`; true for an empty slice.
pub fn and(model: &mut Model, bools: &[BoolVar]) -> BoolVar {
    reify_connective(model, bools, Connective::And, None)
}

/// The disjunction of `bools`; false for an empty slice.
pub fn or(model: &mut Model, bools: &[BoolVar]) -> BoolVar {
    reify_connective(model, bools, Connective::Or, None)
}

/// Like [`and`], naming the result `tag` if a variable is needed.
pub(crate) fn and_tagged(model: &mut Model, bools: &[BoolVar], tag: VariableTag) -> BoolVar {
    reify_connective(model, bools, Connective::And, Some(tag))
}

/// Like [`or`], naming the result `tag` if a variable is needed.
pub(crate) fn or_tagged(model: &mut Model, bools: &[BoolVar], tag: VariableTag) -> BoolVar {
    reify_connective(model, bools, Connective::Or, Some(tag))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

fn reify_connective(
    model: &mut Model,
    bools: &[BoolVar],
    connective: Connective,
    tag: Option<VariableTag>,
) -> BoolVar {
    // A false operand decides a conjunction, a true one a disjunction.
    let absorbing = connective == Connective::Or;
    let Some(literals) = unfixed_literals(model, bools, absorbing) else {
        return model.bool_constant(absorbing);
    };

    match literals.len() {
        0 => model.bool_constant(!absorbing),
        1 => BoolVar::new(literals[0]),
        _ => {
            let reified = match (tag, connective) {
                (Some(tag), _) => model.new_tagged_bool(tag),
                (None, Connective::And) => model.new_auxiliary_bool(AuxiliaryKind::Conjunction),
                (None, Connective::Or) => model.new_auxiliary_bool(AuxiliaryKind::Disjunction),
            };
            match connective {
                Connective::And => {
                    model.post_reified(reified, |tag| constraints::conjunction(literals, tag));
                }
                Connective::Or => {
                    model.post_reified(reified, |tag| constraints::clause(literals, tag));
                }
            }
            reified
        }
    }
}

/// Enforces every boolean in `bools`.
pub fn all_true(model: &mut Model, bools: &[BoolVar]) {
    let Some(literals) = unfixed_literals(model, bools, false) else {
        model.mark_infeasible("a required boolean is false");
        return;
    };

    if !literals.is_empty() {
        model.post(|tag| constraints::conjunction(literals, tag));
    }
}

/// Enforces at least one boolean in `bools`.
pub fn any_true(model: &mut Model, bools: &[BoolVar]) {
    let Some(literals) = unfixed_literals(model, bools, true) else {
        return;
    };

    if literals.is_empty() {
        model.mark_infeasible("empty disjunction");
    } else {
        model.post(|tag| constraints::clause(literals, tag));
    }
}

/// Enforces `premise -> conclusion`.
pub fn implies(model: &mut Model, premise: BoolVar, conclusion: BoolVar) {
    any_true(model, &[!premise, conclusion]);
}

/// The literals of `bools` which are not fixed, or `None` as soon as one is fixed to `absorbing`.
fn unfixed_literals(model: &Model, bools: &[BoolVar], absorbing: bool) -> Option<Vec<Literal>> {
    let mut literals = Vec::with_capacity(bools.len());
    for &var in bools {
        match model.fixed_bool(var) {
            Some(value) if value == absorbing => return None,
            Some(_) => {}
            None => {
                if !literals.contains(&var.literal()) {
                    literals.push(var.literal());
                }
            }
        }
    }
    Some(literals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_literals_are_decided_without_variables() {
        let mut model = Model::default();

        assert_eq!(is_equal(&mut model, 3, 3), model.true_bool());
        assert_eq!(is_equal(&mut model, 3, 4), model.false_bool());
        assert_eq!(is_less(&mut model, 3, 4), model.true_bool());
        assert_eq!(model.statistics().bool_variables, 0);
    }

    #[test]
    fn comparisons_decided_by_bounds_are_constant() {
        let mut model = Model::default();
        let small = model.new_int(1, 3);
        let large = model.new_int(5, 9);

        assert_eq!(is_less(&mut model, small, large), model.true_bool());
        assert_eq!(is_equal(&mut model, small, large), model.false_bool());
        assert_eq!(is_greater_or_equal(&mut model, small, large), model.false_bool());
    }

    #[test]
    fn connectives_drop_fixed_operands() {
        let mut model = Model::default();
        let a = model.new_bool();
        let t = model.true_bool();
        let f = model.false_bool();

        assert_eq!(and(&mut model, &[a, t]), a);
        assert_eq!(and(&mut model, &[a, f]), f);
        assert_eq!(or(&mut model, &[a, f]), a);
        assert_eq!(or(&mut model, &[a, t]), t);
        assert_eq!(and(&mut model, &[]), t);
        assert_eq!(or(&mut model, &[]), f);
    }

    #[test]
    fn an_empty_disjunction_makes_the_model_infeasible() {
        let mut model = Model::default();
        any_true(&mut model, &[]);

        assert!(model.is_infeasible());
    }
}
