use std::fmt::Display;
use std::fmt::Formatter;

use enum_map::Enum;
use pumpkin_solver::variables::AffineView;
use pumpkin_solver::variables::DomainId;

use crate::basic_types::Cell;
use crate::containers::HashMap;
use crate::grid::Layer;

/// What an auxiliary variable was introduced for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enum)]
pub enum AuxiliaryKind {
    /// Allocated directly through [`Model::new_int`](crate::model::Model::new_int) or
    /// [`Model::new_bool`](crate::model::Model::new_bool).
    Free,
    Equality,
    Comparison,
    Conjunction,
    Disjunction,
    Count,
    Sum,
    MaskedTerm,
    Product,
    Distance,
    Quotient,
    Remainder,
    Extremum,
}

impl AuxiliaryKind {
    fn label(self) -> &'static str {
        match self {
            AuxiliaryKind::Free => "var",
            AuxiliaryKind::Equality => "eq",
            AuxiliaryKind::Comparison => "le",
            AuxiliaryKind::Conjunction => "and",
            AuxiliaryKind::Disjunction => "or",
            AuxiliaryKind::Count => "count",
            AuxiliaryKind::Sum => "sum",
            AuxiliaryKind::MaskedTerm => "masked",
            AuxiliaryKind::Product => "prod",
            AuxiliaryKind::Distance => "dist",
            AuxiliaryKind::Quotient => "quot",
            AuxiliaryKind::Remainder => "rem",
            AuxiliaryKind::Extremum => "ext",
        }
    }
}

/// The structured name of a variable. Rendered to a string only when asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariableTag {
    Cell { layer: Layer, cell: Cell },
    Constant(i32),
    /// Index into the symbol table of [`VariableNames`].
    Symbol(u32),
    /// Index into the clue label table of [`VariableNames`].
    Clue(u32),
    Auxiliary { kind: AuxiliaryKind, index: u32 },
    Floodfill { cell: Cell, depth: u32 },
    Edge { from: Cell, to: Cell },
}

/// Lookup table from solver variables to their [`VariableTag`].
#[derive(Clone, Debug, Default)]
pub struct VariableNames {
    tags: HashMap<AffineView<DomainId>, VariableTag>,
    symbols: Vec<String>,
    clues: Vec<String>,
}

impl VariableNames {
    pub(crate) fn record(&mut self, view: AffineView<DomainId>, tag: VariableTag) {
        let _ = self.tags.insert(view, tag);
    }

    pub fn tag_of(&self, view: AffineView<DomainId>) -> Option<VariableTag> {
        self.tags.get(&view).copied()
    }

    pub(crate) fn add_symbol(&mut self, name: &str) -> VariableTag {
        self.symbols.push(name.to_owned());
        VariableTag::Symbol((self.symbols.len() - 1) as u32)
    }

    pub(crate) fn add_clue(&mut self, label: &str) -> VariableTag {
        self.clues.push(label.to_owned());
        VariableTag::Clue((self.clues.len() - 1) as u32)
    }

    pub fn render(&self, tag: VariableTag) -> String {
        RenderedTag { names: self, tag }.to_string()
    }
}

struct RenderedTag<'a> {
    names: &'a VariableNames,
    tag: VariableTag,
}

impl Display for RenderedTag<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.tag {
            VariableTag::Cell { layer, cell } => write!(f, "{layer}[{cell}]"),
            VariableTag::Constant(value) => write!(f, "const({value})"),
            VariableTag::Symbol(index) => match self.names.symbols.get(index as usize) {
                Some(name) => write!(f, "${name}"),
                None => write!(f, "$?{index}"),
            },
            VariableTag::Clue(index) => match self.names.clues.get(index as usize) {
                Some(label) => write!(f, "clue({label})#{index}"),
                None => write!(f, "clue#{index}"),
            },
            VariableTag::Auxiliary { kind, index } => write!(f, "{}#{index}", kind.label()),
            VariableTag::Floodfill { cell, depth } => write!(f, "vol[{cell}]@{depth}"),
            VariableTag::Edge { from, to } => write!(f, "edge[{from}-{to}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_render_readably() {
        let mut names = VariableNames::default();
        let symbol = names.add_symbol("x");

        assert_eq!(names.render(symbol), "$x");
        assert_eq!(
            names.render(VariableTag::Cell {
                layer: Layer::Values,
                cell: Cell::new(1, 2)
            }),
            "values[r1c2]"
        );
        assert_eq!(
            names.render(VariableTag::Auxiliary {
                kind: AuxiliaryKind::Count,
                index: 3
            }),
            "count#3"
        );
    }
}
