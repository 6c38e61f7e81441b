use log::trace;

use super::Alternative;
use super::ClueToken;
use super::ClueValue;
use super::Model;
use crate::basic_types::Bounds;
use crate::basic_types::ModelError;
use crate::basic_types::ModelResult;
use crate::containers::HashMap;
use crate::encoders;
use crate::variables::IntVar;
use crate::variables::Value;

/// Values already resolved for a model, so that equal clues share one variable.
#[derive(Clone, Debug, Default)]
pub(super) struct ClueCache {
    values: HashMap<ClueValue, Value>,
    symbols: HashMap<String, IntVar>,
}

impl Model {
    /// Turns a clue token into a [`Value`] in `[lb, ub]`.
    ///
    /// Literals stay literals; ranges, alternatives and symbols become variables. Resolving an
    /// equal token twice returns the same value and posts nothing the second time. The
    /// `fallback_name` labels the variable created for a range or a list of alternatives.
    ///
    /// Ranges are clamped to `[lb, ub]` and alternatives outside it are dropped, but a bare
    /// literal is returned as given even when it lies outside `[lb, ub]`. Equating it with a cell
    /// then makes the model infeasible rather than failing here.
    pub fn resolve(
        &mut self,
        token: impl Into<ClueToken>,
        lb: i32,
        ub: i32,
        fallback_name: &str,
    ) -> ModelResult<Value> {
        if lb > ub {
            return Err(ModelError::EmptyDomain { lb, ub });
        }
        let bounds = Bounds::new(lb, ub);
        let clue = ClueValue::parse(&token.into())?;

        if let Some(&value) = self.clues.values.get(&clue) {
            trace!("reusing the value of clue {clue:?}");
            return Ok(value);
        }

        let value = match &clue {
            ClueValue::Literal(value) => Value::Literal(*value),
            ClueValue::Symbol(name) => Value::Variable(self.symbol(name, bounds)),
            ClueValue::Interval { min, max } => {
                let lb = min.map_or(lb, |min| min.max(lb));
                let ub = max.map_or(ub, |max| max.min(ub));
                if lb > ub {
                    return Err(ModelError::EmptyDomain { lb, ub });
                }

                let tag = self.names.add_clue(fallback_name);
                Value::Variable(self.new_tagged_int(Bounds::new(lb, ub), tag))
            }
            ClueValue::Alternatives(alternatives) => {
                Value::Variable(self.alternatives(alternatives, bounds, fallback_name)?)
            }
        };

        let _ = self.clues.values.insert(clue, value);
        Ok(value)
    }

    /// The variable shared by every clue naming `name`.
    ///
    /// The first use of a symbol decides its domain.
    pub fn symbol(&mut self, name: &str, bounds: Bounds) -> IntVar {
        if let Some(&var) = self.clues.symbols.get(name) {
            return var;
        }

        let tag = self.names.add_symbol(name);
        let var = self.new_tagged_int(bounds, tag);
        let _ = self.clues.symbols.insert(name.to_owned(), var);
        var
    }

    fn alternatives(
        &mut self,
        alternatives: &[Alternative],
        bounds: Bounds,
        fallback_name: &str,
    ) -> ModelResult<IntVar> {
        let tag = self.names.add_clue(fallback_name);
        let var = self.new_tagged_int(bounds, tag);

        let mut options = Vec::with_capacity(alternatives.len());
        for alternative in alternatives {
            match alternative {
                Alternative::Literal(value) if bounds.contains(*value) => {
                    options.push(encoders::is_equal(self, var, *value));
                }
                Alternative::Literal(_) => {}
                Alternative::Symbol(name) => {
                    let symbol = self.symbol(name, bounds);
                    options.push(encoders::is_equal(self, var, symbol));
                }
            }
        }

        if options.is_empty() {
            return Err(ModelError::EmptyDomain {
                lb: bounds.lb,
                ub: bounds.ub,
            });
        }

        encoders::any_true(self, &options);
        Ok(var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SolveOutcome;

    #[test]
    fn equal_tokens_resolve_to_the_same_value() {
        let mut model = Model::default();

        let first = model.resolve(">5", 1, 9, "clue").unwrap();
        let second = model.resolve(" >5", 1, 9, "clue").unwrap();
        let third = model.resolve(">=6", 1, 9, "clue").unwrap();

        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(first.bounds(), Bounds::new(6, 9));
    }

    #[test]
    fn literals_outside_the_bounds_are_kept() {
        let mut model = Model::default();
        let cell = model.new_int(1, 9);

        let given = model.resolve("12", 1, 9, "given").unwrap();
        assert_eq!(given, Value::Literal(12));

        encoders::equal(&mut model, cell, given);
        assert!(matches!(model.solve(), SolveOutcome::NoSolution));
    }

    #[test]
    fn symbols_are_shared_between_clues() {
        let mut model = Model::default();

        let x = model.resolve("x", 1, 9, "a").unwrap();
        let alternatives = model.resolve("x,3", 1, 9, "b").unwrap();

        assert_eq!(Some(model.symbol("x", Bounds::new(1, 9))), x.as_variable());
        assert_ne!(x, alternatives);
    }

    #[test]
    fn literals_stay_literals() {
        let mut model = Model::default();

        assert_eq!(model.resolve(4, 1, 9, "a"), Ok(Value::Literal(4)));
        assert_eq!(model.resolve("12", 1, 9, "a"), Ok(Value::Literal(12)));
    }

    #[test]
    fn empty_ranges_are_errors() {
        let mut model = Model::default();

        assert_eq!(
            model.resolve(">9", 1, 9, "a"),
            Err(ModelError::EmptyDomain { lb: 10, ub: 9 })
        );
        assert_eq!(
            model.resolve("12,13", 1, 9, "a"),
            Err(ModelError::EmptyDomain { lb: 1, ub: 9 })
        );
    }

    #[test]
    fn alternatives_only_allow_the_listed_values() {
        let mut model = Model::default();
        let value = model.resolve("2,4", 1, 9, "a").unwrap();
        let var = value.as_variable().unwrap();
        encoders::not_equal(&mut model, var, 2);

        let SolveOutcome::Solved(solution) = model.solve() else {
            panic!("expected a solution");
        };
        assert_eq!(solution.int_value(var), 4);
    }
}
