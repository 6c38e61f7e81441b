use std::ops::Range;

use crate::basic_types::ModelError;
use crate::basic_types::ModelResult;
use crate::encoders::and;
use crate::encoders::at_most_one;
use crate::encoders::equal;
use crate::encoders::exactly_one;
use crate::encoders::is_at_most_one;
use crate::encoders::is_equal;
use crate::encoders::is_exactly_one;
use crate::encoders::is_member_of;
use crate::encoders::modulo;
use crate::model::Model;
use crate::variables::collect_values;
use crate::variables::BoolVar;
use crate::variables::IntVar;
use crate::variables::Value;

/// Enforces that every run of `groups.len()` neighbouring elements contains exactly one value
/// from each group. Lines shorter than that contain at most one value from each group.
///
/// With the groups `{1,2,3}`, `{4,5,6}` and `{7,8,9}` this is an entropic line.
pub fn entropic_line(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    groups: &[Vec<i32>],
) {
    let classes = group_classes(model, values, groups);
    let _ = window_checks(model, &classes, groups.len(), Posting::Enforce);
}

/// Whether every run of `groups.len()` neighbouring elements contains exactly one value from each
/// group.
pub fn is_entropic_line(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    groups: &[Vec<i32>],
) -> BoolVar {
    let classes = group_classes(model, values, groups);
    let checks = window_checks(model, &classes, groups.len(), Posting::Reify);
    and(model, &checks)
}

/// Enforces that every run of `modulus` neighbouring elements contains one element of every
/// residue class modulo `modulus`.
pub fn modular_line(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    modulus: i32,
) -> ModelResult<()> {
    let classes = residue_classes(model, values, modulus)?;
    let _ = window_checks(model, &classes, modulus as usize, Posting::Enforce);
    Ok(())
}

/// Whether every run of `modulus` neighbouring elements contains one element of every residue
/// class modulo `modulus`.
pub fn is_modular_line(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    modulus: i32,
) -> ModelResult<BoolVar> {
    let classes = residue_classes(model, values, modulus)?;
    let checks = window_checks(model, &classes, modulus as usize, Posting::Reify);
    Ok(and(model, &checks))
}

/// Enforces that within every run of `modulus` neighbouring elements all elements share one
/// residue class modulo `modulus`.
pub fn unimodular_line(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    modulus: i32,
) -> ModelResult<()> {
    let residues = residues(model, values, modulus)?;
    for window in windows(residues.len(), modulus as usize) {
        let first = residues[window.start];
        for &other in &residues[window.start + 1..window.end] {
            equal(model, first, other);
        }
    }
    Ok(())
}

/// Whether within every run of `modulus` neighbouring elements all elements share one residue
/// class modulo `modulus`.
pub fn is_unimodular_line(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    modulus: i32,
) -> ModelResult<BoolVar> {
    let residues = residues(model, values, modulus)?;
    let mut checks = Vec::new();
    for window in windows(residues.len(), modulus as usize) {
        let first = residues[window.start];
        for &other in &residues[window.start + 1..window.end] {
            checks.push(is_equal(model, first, other));
        }
    }
    Ok(and(model, &checks))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Posting {
    Enforce,
    Reify,
}

/// `classes[i][c]` states that element `i` belongs to class `c`.
///
/// For every window and every class, the window holds exactly one member of the class; a line
/// shorter than a window holds at most one. Returns the reified checks when reifying.
fn window_checks(
    model: &mut Model,
    classes: &[Vec<BoolVar>],
    window_size: usize,
    posting: Posting,
) -> Vec<BoolVar> {
    let class_count = classes.first().map_or(0, Vec::len);
    let mut checks = Vec::new();

    for window in windows(classes.len(), window_size) {
        let complete = window.len() == window_size;
        for class in 0..class_count {
            let members = classes[window.clone()]
                .iter()
                .map(|element| element[class])
                .collect::<Vec<_>>();

            match (posting, complete) {
                (Posting::Enforce, true) => exactly_one(model, &members),
                (Posting::Enforce, false) => at_most_one(model, &members),
                (Posting::Reify, true) => checks.push(is_exactly_one(model, &members)),
                (Posting::Reify, false) => checks.push(is_at_most_one(model, &members)),
            }
        }
    }

    checks
}

fn group_classes(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    groups: &[Vec<i32>],
) -> Vec<Vec<BoolVar>> {
    collect_values(values)
        .into_iter()
        .map(|value| {
            groups
                .iter()
                .map(|group| is_member_of(model, group, value))
                .collect()
        })
        .collect()
}

fn residue_classes(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    modulus: i32,
) -> ModelResult<Vec<Vec<BoolVar>>> {
    let residues = residues(model, values, modulus)?;
    Ok(residues
        .into_iter()
        .map(|residue| {
            (0..modulus)
                .map(|class| is_equal(model, residue, class))
                .collect()
        })
        .collect())
}

fn residues(
    model: &mut Model,
    values: impl IntoIterator<Item = impl Into<Value>>,
    modulus: i32,
) -> ModelResult<Vec<IntVar>> {
    if modulus <= 0 {
        return Err(ModelError::NonPositiveModulus(modulus));
    }

    Ok(collect_values(values)
        .into_iter()
        .map(|value| modulo(model, value, modulus))
        .collect())
}

/// The sliding windows of `size` over `len` elements; the whole line if it is shorter.
fn windows(len: usize, size: usize) -> Vec<Range<usize>> {
    if len == 0 || size == 0 {
        Vec::new()
    } else if len <= size {
        vec![0..len]
    } else {
        (0..=len - size).map(|start| start..start + size).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SolveOutcome;

    fn entropy_groups() -> Vec<Vec<i32>> {
        vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]
    }

    #[test]
    fn windows_slide_over_the_line() {
        assert_eq!(windows(4, 3), vec![0..3, 1..4]);
        assert_eq!(windows(2, 3), vec![0..2]);
        assert!(windows(0, 3).is_empty());
    }

    #[test]
    fn entropic_literals_are_decided() {
        let mut model = Model::default();

        assert_eq!(
            is_entropic_line(&mut model, [1, 5, 9, 2], &entropy_groups()),
            model.true_bool()
        );
        assert_eq!(
            is_entropic_line(&mut model, [1, 5, 9, 8], &entropy_groups()),
            model.false_bool()
        );
    }

    #[test]
    fn entropic_line_repeats_the_group_pattern() {
        let mut model = Model::default();
        let x = model.new_int(1, 9);
        entropic_line(
            &mut model,
            [Value::Literal(2), Value::Literal(4), Value::Literal(9), Value::from(x)],
            &entropy_groups(),
        );

        let SolveOutcome::Solved(solution) = model.solve() else {
            panic!("expected a solution");
        };
        assert!((1..=3).contains(&solution.int_value(x)));
    }

    #[test]
    fn modular_line_needs_every_residue() {
        let mut model = Model::default();

        assert_eq!(
            is_modular_line(&mut model, [1, 5, 9, 4], 3),
            Ok(model.true_bool())
        );
        assert_eq!(
            is_modular_line(&mut model, [1, 4, 9], 3),
            Ok(model.false_bool())
        );
        assert_eq!(
            modular_line(&mut model, [1, 2], 0),
            Err(ModelError::NonPositiveModulus(0))
        );
    }

    #[test]
    fn unimodular_line_shares_one_residue() {
        let mut model = Model::default();

        assert_eq!(
            is_unimodular_line(&mut model, [1, 4, 7], 3),
            Ok(model.true_bool())
        );
        assert_eq!(
            is_unimodular_line(&mut model, [1, 4, 8], 3),
            Ok(model.false_bool())
        );
    }
}
