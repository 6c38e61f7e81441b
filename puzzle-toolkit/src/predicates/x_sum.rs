use crate::encoders::and;
use crate::encoders::is_less_or_equal;
use crate::encoders::is_linear_less_or_equal;
use crate::encoders::masked_sum;
use crate::model::Model;
use crate::variables::collect_values;
use crate::variables::IntVar;
use crate::variables::Value;

/// Which cells of a line an X-sum clue adds up. `K` is the value of the first cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XSumKind {
    /// The first `K` cells.
    Plain,
    /// `K` cells starting at the given position.
    Shifted(Value),
    /// The first `K - 1` cells.
    Shortsighted,
    /// The `K` cells after the first one.
    Broken,
}

/// The X-sum of `line` selected by `kind`; zero for an empty line.
pub fn x_sum(
    model: &mut Model,
    line: impl IntoIterator<Item = impl Into<Value>>,
    kind: XSumKind,
) -> IntVar {
    let line = collect_values(line);
    let Some(&count) = line.first() else {
        return model.constant(0);
    };

    let (start, length) = match kind {
        XSumKind::Plain => (Value::Literal(0), count),
        XSumKind::Shifted(start) => (start, count),
        XSumKind::Shortsighted => (Value::Literal(0), count.offset(-1)),
        XSumKind::Broken => (Value::Literal(1), count),
    };
    windowed_sum(model, line, start, length)
}

/// The sum of `line[i]` over `start <= i < start + length`.
pub fn windowed_sum(
    model: &mut Model,
    line: impl IntoIterator<Item = impl Into<Value>>,
    start: impl Into<Value>,
    length: impl Into<Value>,
) -> IntVar {
    let line = collect_values(line);
    let (start, length) = (start.into(), length.into());

    let mask = (0..line.len() as i32)
        .map(|position| {
            let started = is_less_or_equal(model, start, position);
            let not_ended = is_linear_less_or_equal(
                model,
                [(1, Value::Literal(position)), (-1, start), (-1, length)],
                -1,
            );
            and(model, &[started, not_ended])
        })
        .collect::<Vec<_>>();

    masked_sum(model, line, &mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Bounds;
    use crate::encoders::equal;
    use crate::model::SolveOutcome;

    #[test]
    fn kinds_select_different_windows() {
        let mut model = Model::default();
        let line = [3, 1, 2, 9];

        let sums = [
            XSumKind::Plain,
            XSumKind::Shortsighted,
            XSumKind::Broken,
            XSumKind::Shifted(Value::Literal(1)),
        ]
        .map(|kind| x_sum(&mut model, line, kind).bounds());

        assert_eq!(
            sums,
            [
                Bounds::fixed(6),
                Bounds::fixed(4),
                Bounds::fixed(12),
                Bounds::fixed(12)
            ]
        );
    }

    #[test]
    fn plain_x_sum_constrains_the_count() {
        let mut model = Model::default();
        let count = model.new_int(1, 3);
        let line = [Value::from(count), Value::Literal(4), Value::Literal(5)];
        let total = x_sum(&mut model, line, XSumKind::Plain);
        equal(&mut model, total, 6);

        let SolveOutcome::Solved(solution) = model.solve() else {
            panic!("expected a solution");
        };
        assert_eq!(solution.int_value(count), 2);
    }
}
