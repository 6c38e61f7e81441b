use std::collections::VecDeque;

use crate::basic_types::Cell;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::model::Model;
use crate::variables::BoolVar;
use crate::variables::VariableTag;

/// Dense index of a cell within an [`Adjacency`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellId(u32);

impl StorageKey for CellId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        CellId(index as u32)
    }
}

/// The at most four orthogonal neighbours of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Neighbours {
    ids: [CellId; 4],
    len: u8,
}

impl Neighbours {
    fn empty() -> Self {
        Neighbours {
            ids: [CellId(0); 4],
            len: 0,
        }
    }

    fn push(&mut self, id: CellId) {
        assert!(self.len < 4, "a cell has at most four orthogonal neighbours");
        self.ids[self.len as usize] = id;
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = CellId> + '_ {
        self.ids[..self.len as usize].iter().copied()
    }
}

/// An immutable orthogonal adjacency graph over a set of cells.
///
/// Cells are numbered in row-major order, so [`CellId`] order is the canonical cell order.
#[derive(Clone, Debug)]
pub struct Adjacency {
    cells: KeyedVec<CellId, Cell>,
    ids: HashMap<Cell, CellId>,
    neighbours: KeyedVec<CellId, Neighbours>,
}

impl Adjacency {
    /// Links every pair of orthogonally adjacent cells.
    pub fn orthogonal(cells: impl IntoIterator<Item = Cell>) -> Adjacency {
        Adjacency::orthogonal_where(cells, |_, _| true)
    }

    /// Links orthogonally adjacent cells `a < b` for which `linked(a, b)` holds, e.g. to stop
    /// adjacency at region borders.
    pub fn orthogonal_where(
        cells: impl IntoIterator<Item = Cell>,
        linked: impl Fn(Cell, Cell) -> bool,
    ) -> Adjacency {
        let mut sorted = cells.into_iter().collect::<Vec<_>>();
        sorted.sort();
        sorted.dedup();

        let cells = sorted.into_iter().collect::<KeyedVec<CellId, Cell>>();
        let ids = cells
            .enumerate()
            .map(|(id, &cell)| (cell, id))
            .collect::<HashMap<_, _>>();

        let neighbours = cells
            .iter()
            .map(|&cell| {
                let mut neighbours = Neighbours::empty();
                for other in cell.orthogonal_neighbours() {
                    let Some(&other_id) = ids.get(&other) else {
                        continue;
                    };
                    if linked(cell.min(other), cell.max(other)) {
                        neighbours.push(other_id);
                    }
                }
                neighbours
            })
            .collect();

        Adjacency {
            cells,
            ids,
            neighbours,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn id(&self, cell: Cell) -> Option<CellId> {
        self.ids.get(&cell).copied()
    }

    pub fn cell(&self, id: CellId) -> Cell {
        self.cells[id]
    }

    pub fn ids(&self) -> impl Iterator<Item = CellId> {
        self.cells.keys()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    pub fn neighbours(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.neighbours[id].iter()
    }

    /// The neighbours of `cell`; empty when the cell is not part of the graph.
    pub fn neighbours_of(&self, cell: Cell) -> Vec<Cell> {
        self.id(cell)
            .map(|id| self.neighbours(id).map(|other| self.cell(other)).collect())
            .unwrap_or_default()
    }

    /// Every undirected edge once, as `(a, b)` with `a < b`.
    pub fn edges(&self) -> impl Iterator<Item = (CellId, CellId)> + '_ {
        self.ids().flat_map(move |id| {
            self.neighbours(id)
                .filter(move |&other| id < other)
                .map(move |other| (id, other))
        })
    }

    /// Breadth-first distance of every cell from `source`; `None` for unreachable cells.
    pub fn distances_from(&self, source: CellId) -> KeyedVec<CellId, Option<u32>> {
        let mut distances = self
            .ids()
            .map(|_| None)
            .collect::<KeyedVec<CellId, Option<u32>>>();
        distances[source] = Some(0);

        let mut queue = VecDeque::from([source]);
        while let Some(id) = queue.pop_front() {
            let next = distances[id].map_or(0, |distance| distance + 1);
            for other in self.neighbours(id) {
                if distances[other].is_none() {
                    distances[other] = Some(next);
                    queue.push_back(other);
                }
            }
        }

        distances
    }
}

/// An [`Adjacency`] whose edges are decided by the solver: every undirected edge carries a
/// [`BoolVar`] stating whether it is part of the structure (a loop, a path, ...).
#[derive(Clone, Debug)]
pub struct EdgeAdjacency {
    adjacency: Adjacency,
    edges: HashMap<(CellId, CellId), BoolVar>,
}

impl EdgeAdjacency {
    /// Allocates one edge variable per edge of `adjacency`.
    pub fn new(model: &mut Model, adjacency: Adjacency) -> EdgeAdjacency {
        let edges = adjacency
            .edges()
            .map(|(a, b)| {
                let tag = VariableTag::Edge {
                    from: adjacency.cell(a),
                    to: adjacency.cell(b),
                };
                ((a, b), model.new_tagged_bool(tag))
            })
            .collect();

        EdgeAdjacency { adjacency, edges }
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn edge(&self, a: CellId, b: CellId) -> Option<BoolVar> {
        self.edges.get(&(a.min(b), a.max(b))).copied()
    }

    /// The neighbours of `id` together with the variable of the connecting edge.
    pub fn incident(&self, id: CellId) -> impl Iterator<Item = (CellId, BoolVar)> + '_ {
        self.adjacency
            .neighbours(id)
            .filter_map(move |other| Some((other, self.edge(id, other)?)))
    }

    /// All edges as `(a, b, var)` with `a < b`, in canonical order.
    pub fn edges(&self) -> impl Iterator<Item = (Cell, Cell, BoolVar)> + '_ {
        self.adjacency.edges().filter_map(|(a, b)| {
            let var = self.edge(a, b)?;
            Some((self.adjacency.cell(a), self.adjacency.cell(b), var))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::rectangle;

    #[test]
    fn corner_edge_and_centre_cells_have_two_three_and_four_neighbours() {
        let adjacency = Adjacency::orthogonal(rectangle(3, 3));

        assert_eq!(adjacency.neighbours_of(Cell::new(0, 0)).len(), 2);
        assert_eq!(adjacency.neighbours_of(Cell::new(0, 1)).len(), 3);
        assert_eq!(adjacency.neighbours_of(Cell::new(1, 1)).len(), 4);
        assert_eq!(adjacency.edges().count(), 12);
    }

    #[test]
    fn ids_follow_row_major_order() {
        let adjacency = Adjacency::orthogonal([Cell::new(1, 0), Cell::new(0, 1), Cell::new(0, 0)]);

        assert_eq!(adjacency.cell(CellId(0)), Cell::new(0, 0));
        assert_eq!(adjacency.cell(CellId(1)), Cell::new(0, 1));
        assert_eq!(adjacency.cell(CellId(2)), Cell::new(1, 0));
    }

    #[test]
    fn links_can_be_cut() {
        let wall = (Cell::new(0, 0), Cell::new(0, 1));
        let adjacency =
            Adjacency::orthogonal_where(rectangle(1, 3), |a, b| (a, b) != wall);

        assert_eq!(adjacency.neighbours_of(Cell::new(0, 0)), vec![]);
        assert_eq!(
            adjacency.neighbours_of(Cell::new(0, 1)),
            vec![Cell::new(0, 2)]
        );
    }

    #[test]
    fn distances_ignore_unreachable_cells() {
        let cells = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2), Cell::new(5, 5)];
        let adjacency = Adjacency::orthogonal(cells);
        let source = adjacency.id(Cell::new(0, 0)).unwrap();
        let distances = adjacency.distances_from(source);

        assert_eq!(
            distances.iter().copied().collect::<Vec<_>>(),
            vec![Some(0), Some(1), Some(2), None]
        );
    }
}
