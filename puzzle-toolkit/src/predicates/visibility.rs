use crate::encoders::and;
use crate::encoders::count_true;
use crate::encoders::is_less;
use crate::model::Model;
use crate::variables::collect_values;
use crate::variables::IntVar;
use crate::variables::Value;

/// Counts the positions of `line` that can be seen from its start.
///
/// With a `threshold`, position `j` is visible when every element before it is strictly lower
/// than the threshold. Without one, position `j` is visible when every element before it is
/// strictly lower than the element at `j` itself.
pub fn visible_count(
    model: &mut Model,
    line: impl IntoIterator<Item = impl Into<Value>>,
    threshold: Option<Value>,
) -> IntVar {
    let line = collect_values(line);

    let visible = match threshold {
        Some(threshold) => {
            let mut clear = model.true_bool();
            line.iter()
                .map(|&element| {
                    let visible = clear;
                    let below = is_less(model, element, threshold);
                    clear = and(model, &[clear, below]);
                    visible
                })
                .collect::<Vec<_>>()
        }
        None => (0..line.len())
            .map(|position| {
                let lower = line[..position]
                    .iter()
                    .map(|&before| is_less(model, before, line[position]))
                    .collect::<Vec<_>>();
                and(model, &lower)
            })
            .collect(),
    };

    count_true(model, &visible)
}

/// The number of skyscrapers seen from the start of `line`.
pub fn skyscraper(model: &mut Model, line: impl IntoIterator<Item = impl Into<Value>>) -> IntVar {
    visible_count(model, line, None)
}

/// The number of cells of `line` a watchtower of height `tower` at its start looks over.
pub fn watchtower(
    model: &mut Model,
    tower: impl Into<Value>,
    line: impl IntoIterator<Item = impl Into<Value>>,
) -> IntVar {
    visible_count(model, line, Some(tower.into()))
}
