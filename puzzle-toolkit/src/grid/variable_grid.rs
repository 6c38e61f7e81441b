use std::collections::BTreeMap;

use super::Layer;
use crate::basic_types::Cell;
use crate::basic_types::ModelError;
use crate::basic_types::ModelResult;

/// The decision variables of one [`Layer`], keyed by cell.
///
/// Iteration is in row-major cell order regardless of insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableGrid<V> {
    layer: Layer,
    cells: BTreeMap<Cell, V>,
}

impl<V: Copy> VariableGrid<V> {
    pub fn new(layer: Layer) -> Self {
        VariableGrid {
            layer,
            cells: BTreeMap::new(),
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Stores `var` for `cell`, returning the variable previously stored there.
    pub fn insert(&mut self, cell: Cell, var: V) -> Option<V> {
        self.cells.insert(cell, var)
    }

    pub fn get(&self, cell: Cell) -> Option<V> {
        self.cells.get(&cell).copied()
    }

    /// Like [`VariableGrid::get`], but a missing cell is a configuration error.
    pub fn var(&self, cell: Cell) -> ModelResult<V> {
        self.get(cell).ok_or(ModelError::MissingCell(cell))
    }

    /// The variables along `cells`, in the given order.
    pub fn line(&self, cells: &[Cell]) -> ModelResult<Vec<V>> {
        cells.iter().map(|&cell| self.var(cell)).collect()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, V)> + '_ {
        self.cells.iter().map(|(&cell, &var)| (cell, var))
    }
}
