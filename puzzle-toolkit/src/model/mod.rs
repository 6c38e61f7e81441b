//! The build context every encoder writes into.
//!
//! A [`Model`] owns the solver together with everything needed to keep the encoding small and
//! consistent: the per-layer variable grids, a cache of constants, the clue and symbol cache used
//! by [`Model::resolve`], and the structured names of all variables. Encoders never talk to the
//! solver directly; they allocate through the `new_*` methods and post through the crate-internal
//! `post*` methods.
//!
//! A constraint which makes the model infeasible at the root is not an error. The conflict is
//! recorded and [`Model::solve`] reports [`SolveOutcome::NoSolution`]. From then on the solver is
//! left alone: constraints are dropped and new variables share a spare solver variable, so a rule
//! generator can keep building the rest of the puzzle.
mod clue;
mod options;
mod outcome;
mod resolve;

use std::fmt::Display;

pub use clue::*;
use enum_map::EnumMap;
use log::debug;
use log::info;
use log::trace;
pub use options::*;
pub use outcome::*;
use pumpkin_solver::constraints::Constraint;
use pumpkin_solver::constraints::NegatableConstraint;
use pumpkin_solver::proof::ConstraintTag;
use pumpkin_solver::results::SatisfactionResult;
use pumpkin_solver::termination::TimeBudget;
use pumpkin_solver::variables::DomainId;
use pumpkin_solver::variables::Literal;
use pumpkin_solver::variables::TransformableVariable;
use pumpkin_solver::ConstraintOperationError;
use pumpkin_solver::Solver;

use crate::basic_types::Bounds;
use crate::basic_types::Cell;
use crate::basic_types::ModelError;
use crate::basic_types::ModelResult;
use crate::containers::HashMap;
use crate::grid::Layer;
use crate::grid::VariableGrid;
use crate::variables::AuxiliaryKind;
use crate::variables::BoolVar;
use crate::variables::IntVar;
use crate::variables::Value;
use crate::variables::VariableNames;
use crate::variables::VariableTag;

/// Counters describing the size of a [`Model`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModelStatistics {
    pub int_variables: usize,
    pub bool_variables: usize,
    pub constraints: usize,
}

impl ModelStatistics {
    fn log(&self, prefix: impl Display) {
        info!("{prefix} intVariables={}", self.int_variables);
        info!("{prefix} boolVariables={}", self.bool_variables);
        info!("{prefix} constraints={}", self.constraints);
    }
}

#[derive(Debug)]
pub struct Model {
    solver: Solver,
    options: ModelOptions,
    names: VariableNames,
    auxiliary_counts: EnumMap<AuxiliaryKind, u32>,
    constants: HashMap<i32, IntVar>,
    true_bool: BoolVar,
    int_layers: HashMap<Layer, VariableGrid<IntVar>>,
    bool_layers: HashMap<Layer, VariableGrid<BoolVar>>,
    clues: resolve::ClueCache,
    statistics: ModelStatistics,
    infeasible: bool,
    /// Handed out in place of new variables once the model is infeasible.
    spare_domain: DomainId,
    spare_literal: Literal,
}

impl Default for Model {
    fn default() -> Self {
        Model::new(ModelOptions::default())
    }
}

impl Model {
    pub fn new(options: ModelOptions) -> Model {
        let mut solver = Solver::default();
        let true_bool = BoolVar::new(solver.get_true_literal());
        let spare_domain = solver.new_bounded_integer(0, 0);
        let spare_literal = solver.new_literal();

        Model {
            solver,
            options,
            names: VariableNames::default(),
            auxiliary_counts: EnumMap::default(),
            constants: HashMap::default(),
            true_bool,
            int_layers: HashMap::default(),
            bool_layers: HashMap::default(),
            clues: resolve::ClueCache::default(),
            statistics: ModelStatistics::default(),
            infeasible: false,
            spare_domain,
            spare_literal,
        }
    }

    pub fn options(&self) -> ModelOptions {
        self.options
    }

    pub fn statistics(&self) -> ModelStatistics {
        self.statistics
    }

    pub fn log_statistics(&self) {
        self.statistics.log("model");
    }

    /// Whether a root-level conflict has been found while building the model.
    pub fn is_infeasible(&self) -> bool {
        self.infeasible
    }

    pub fn names(&self) -> &VariableNames {
        &self.names
    }

    /// A human-readable name for `value`.
    pub fn describe(&self, value: impl Into<Value>) -> String {
        match value.into() {
            Value::Literal(value) => value.to_string(),
            Value::Variable(var) => self
                .names
                .tag_of(var.view())
                .map(|tag| self.names.render(tag))
                .unwrap_or_else(|| format!("{:?}", var.view())),
        }
    }

    /// A human-readable name for `var`; negated booleans are prefixed with `!`.
    pub fn describe_bool(&self, var: BoolVar) -> String {
        if let Some(tag) = self.names.tag_of(var.as_int().view()) {
            self.names.render(tag)
        } else if let Some(tag) = self.names.tag_of((!var).as_int().view()) {
            format!("!{}", self.names.render(tag))
        } else {
            self.describe(var)
        }
    }
}

/// Allocation of variables.
impl Model {
    /// An integer variable with domain `[lb, ub]`.
    ///
    /// # Panics
    /// If `lb > ub`.
    pub fn new_int(&mut self, lb: i32, ub: i32) -> IntVar {
        let tag = self.next_auxiliary_tag(AuxiliaryKind::Free);
        self.new_tagged_int(Bounds::new(lb, ub), tag)
    }

    pub fn new_bool(&mut self) -> BoolVar {
        let tag = self.next_auxiliary_tag(AuxiliaryKind::Free);
        self.new_tagged_bool(tag)
    }

    pub fn new_tagged_int(&mut self, bounds: Bounds, tag: VariableTag) -> IntVar {
        let domain = if self.infeasible {
            self.spare_domain
        } else if self.options.named_variables {
            self.solver
                .new_named_bounded_integer(bounds.lb, bounds.ub, self.names.render(tag))
        } else {
            self.solver.new_bounded_integer(bounds.lb, bounds.ub)
        };

        let var = IntVar::new(domain.scaled(1), bounds);
        if !self.infeasible {
            self.names.record(var.view(), tag);
        }
        self.statistics.int_variables += 1;
        trace!("new int {} in {bounds}", self.names.render(tag));

        var
    }

    pub fn new_tagged_bool(&mut self, tag: VariableTag) -> BoolVar {
        let literal = if self.infeasible {
            self.spare_literal
        } else if self.options.named_variables {
            self.solver.new_named_literal(self.names.render(tag))
        } else {
            self.solver.new_literal()
        };

        let var = BoolVar::new(literal);
        if !self.infeasible {
            self.names.record(var.as_int().view(), tag);
        }
        self.statistics.bool_variables += 1;
        trace!("new bool {}", self.names.render(tag));

        var
    }

    /// An auxiliary integer; a fixed domain yields the cached constant instead.
    pub(crate) fn new_auxiliary_int(&mut self, kind: AuxiliaryKind, bounds: Bounds) -> IntVar {
        if bounds.is_fixed() {
            return self.constant(bounds.lb);
        }

        let tag = self.next_auxiliary_tag(kind);
        self.new_tagged_int(bounds, tag)
    }

    pub(crate) fn new_auxiliary_bool(&mut self, kind: AuxiliaryKind) -> BoolVar {
        let tag = self.next_auxiliary_tag(kind);
        self.new_tagged_bool(tag)
    }

    fn next_auxiliary_tag(&mut self, kind: AuxiliaryKind) -> VariableTag {
        let index = self.auxiliary_counts[kind];
        self.auxiliary_counts[kind] += 1;
        VariableTag::Auxiliary { kind, index }
    }

    /// The variable fixed to `value`. Every call with the same value returns the same variable.
    pub fn constant(&mut self, value: i32) -> IntVar {
        if let Some(&var) = self.constants.get(&value) {
            return var;
        }

        let var = self.new_tagged_int(Bounds::fixed(value), VariableTag::Constant(value));
        let _ = self.constants.insert(value, var);
        var
    }

    pub fn true_bool(&self) -> BoolVar {
        self.true_bool
    }

    pub fn false_bool(&self) -> BoolVar {
        !self.true_bool
    }

    pub fn bool_constant(&self, value: bool) -> BoolVar {
        if value {
            self.true_bool()
        } else {
            self.false_bool()
        }
    }

    /// `Some` if `var` is one of the two constant booleans.
    pub fn fixed_bool(&self, var: BoolVar) -> Option<bool> {
        if var == self.true_bool {
            Some(true)
        } else if var == !self.true_bool {
            Some(false)
        } else {
            None
        }
    }

    /// `value` as a variable, using a constant for literals.
    pub fn as_int_var(&mut self, value: impl Into<Value>) -> IntVar {
        match value.into() {
            Value::Literal(value) => self.constant(value),
            Value::Variable(var) => var,
        }
    }
}

/// Per-layer grids.
impl Model {
    /// Creates the integer grid of `layer` with one variable in `[lb, ub]` per cell.
    pub fn add_int_layer(
        &mut self,
        layer: Layer,
        cells: impl IntoIterator<Item = Cell>,
        lb: i32,
        ub: i32,
    ) -> ModelResult<VariableGrid<IntVar>> {
        if lb > ub {
            return Err(ModelError::EmptyDomain { lb, ub });
        }
        self.check_new_layer(layer)?;

        let mut grid = VariableGrid::new(layer);
        for cell in cells {
            let var = self.new_tagged_int(Bounds::new(lb, ub), VariableTag::Cell { layer, cell });
            let _ = grid.insert(cell, var);
        }

        let _ = self.int_layers.insert(layer, grid.clone());
        Ok(grid)
    }

    /// Creates the boolean grid of `layer` with one variable per cell.
    pub fn add_bool_layer(
        &mut self,
        layer: Layer,
        cells: impl IntoIterator<Item = Cell>,
    ) -> ModelResult<VariableGrid<BoolVar>> {
        self.check_new_layer(layer)?;

        let mut grid = VariableGrid::new(layer);
        for cell in cells {
            let var = self.new_tagged_bool(VariableTag::Cell { layer, cell });
            let _ = grid.insert(cell, var);
        }

        let _ = self.bool_layers.insert(layer, grid.clone());
        Ok(grid)
    }

    pub fn int_layer(&self, layer: Layer) -> ModelResult<&VariableGrid<IntVar>> {
        self.int_layers
            .get(&layer)
            .ok_or(ModelError::UnknownLayer(layer))
    }

    pub fn bool_layer(&self, layer: Layer) -> ModelResult<&VariableGrid<BoolVar>> {
        self.bool_layers
            .get(&layer)
            .ok_or(ModelError::UnknownLayer(layer))
    }

    fn check_new_layer(&self, layer: Layer) -> ModelResult<()> {
        if self.int_layers.contains_key(&layer) || self.bool_layers.contains_key(&layer) {
            Err(ModelError::DuplicateLayer(layer))
        } else {
            Ok(())
        }
    }
}

/// Posting constraints.
impl Model {
    pub(crate) fn post<C: Constraint>(&mut self, constraint: impl FnOnce(ConstraintTag) -> C) {
        if self.infeasible {
            return;
        }
        let tag = self.solver.new_constraint_tag();
        let result = self.solver.add_constraint(constraint(tag)).post();
        self.record_post(result);
    }

    /// Posts `premise -> constraint`.
    pub(crate) fn post_implied<C: Constraint>(
        &mut self,
        premise: BoolVar,
        constraint: impl FnOnce(ConstraintTag) -> C,
    ) {
        if self.infeasible {
            return;
        }
        let tag = self.solver.new_constraint_tag();
        let result = self
            .solver
            .add_constraint(constraint(tag))
            .implied_by(premise.literal());
        self.record_post(result);
    }

    /// Posts `reified <-> constraint`.
    pub(crate) fn post_reified<C: NegatableConstraint>(
        &mut self,
        reified: BoolVar,
        constraint: impl FnOnce(ConstraintTag) -> C,
    ) {
        if self.infeasible {
            return;
        }
        let tag = self.solver.new_constraint_tag();
        let result = self
            .solver
            .add_constraint(constraint(tag))
            .reify(reified.literal());
        self.record_post(result);
    }

    /// Records that the model cannot be satisfied, for a reason found while building it.
    pub(crate) fn mark_infeasible(&mut self, reason: impl Display) {
        if !self.infeasible {
            debug!("model is infeasible: {reason}");
        }
        self.infeasible = true;
    }

    fn record_post(&mut self, result: Result<(), ConstraintOperationError>) {
        self.statistics.constraints += 1;
        if let Err(error) = result {
            self.mark_infeasible(format_args!("root conflict while posting ({error:?})"));
        }
    }
}

/// Solving.
impl Model {
    /// Searches for a solution of everything posted so far.
    pub fn solve(&mut self) -> SolveOutcome {
        if self.infeasible {
            return SolveOutcome::NoSolution;
        }

        let mut brancher = self.solver.default_brancher();
        let mut termination = termination(self.options);

        let outcome = match self.solver.satisfy(&mut brancher, &mut termination) {
            SatisfactionResult::Satisfiable(satisfiable) => {
                SolveOutcome::Solved(Solution::from(satisfiable.solution()))
            }
            SatisfactionResult::Unsatisfiable(..) => SolveOutcome::NoSolution,
            SatisfactionResult::Unknown(..) => SolveOutcome::Unknown,
        };
        outcome
    }
}

/// No termination condition means searching until the solver reaches a conclusion.
fn termination(options: ModelOptions) -> Option<TimeBudget> {
    options.time_limit.map(TimeBudget::starting_now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::rectangle;
    use crate::encoders;

    #[test]
    fn constants_are_cached() {
        let mut model = Model::default();

        let first = model.constant(3);
        let second = model.constant(3);

        assert_eq!(first, second);
        assert_eq!(model.statistics().int_variables, 1);
    }

    #[test]
    fn layers_can_only_be_created_once() {
        let mut model = Model::default();
        let _ = model
            .add_int_layer(Layer::Values, rectangle(2, 2), 1, 4)
            .unwrap();

        assert_eq!(
            model
                .add_bool_layer(Layer::Values, rectangle(2, 2))
                .unwrap_err(),
            ModelError::DuplicateLayer(Layer::Values)
        );
        assert_eq!(
            model.bool_layer(Layer::Shading).unwrap_err(),
            ModelError::UnknownLayer(Layer::Shading)
        );
        assert_eq!(model.int_layer(Layer::Values).unwrap().len(), 4);
    }

    #[test]
    fn variables_are_described_by_their_tag() {
        let mut model = Model::default();
        let grid = model
            .add_bool_layer(Layer::Shading, [Cell::new(2, 3)])
            .unwrap();
        let shaded = grid.var(Cell::new(2, 3)).unwrap();

        assert_eq!(model.describe_bool(shaded), "shading[r2c3]");
        assert_eq!(model.describe_bool(!shaded), "!shading[r2c3]");
        assert_eq!(model.describe(7), "7");
    }

    #[test]
    fn constant_booleans_are_recognised() {
        let model = Model::default();

        assert_eq!(model.fixed_bool(model.true_bool()), Some(true));
        assert_eq!(model.fixed_bool(model.false_bool()), Some(false));
    }

    #[test]
    fn building_continues_after_a_root_conflict() {
        let mut model = Model::default();
        let x = model.new_int(1, 9);
        encoders::equal(&mut model, x, 3);
        encoders::equal(&mut model, x, 4);
        assert!(model.is_infeasible());

        let is_five = encoders::is_equal(&mut model, x, 5);
        let y = model.new_int(1, 9);
        encoders::less_or_equal(&mut model, y, x);
        encoders::any_true(&mut model, &[is_five]);

        assert!(matches!(model.solve(), SolveOutcome::NoSolution));
    }

    #[test]
    fn an_empty_model_is_solved() {
        let mut model = Model::new(ModelOptions {
            named_variables: true,
            ..Default::default()
        });
        let var = model.new_int(2, 2);

        let outcome = model.solve();
        assert_eq!(outcome.solution().map(|solution| solution.int_value(var)), Some(2));
    }
}
