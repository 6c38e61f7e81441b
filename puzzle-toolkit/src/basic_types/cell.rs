use std::fmt::Display;
use std::fmt::Formatter;

/// A grid coordinate. Ordering is row-major, which is the order used to pick canonical cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    /// The four orthogonal neighbours, in the order up, right, down, left.
    pub fn orthogonal_neighbours(self) -> [Cell; 4] {
        [
            Cell::new(self.row - 1, self.col),
            Cell::new(self.row, self.col + 1),
            Cell::new(self.row + 1, self.col),
            Cell::new(self.row, self.col - 1),
        ]
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}c{}", self.row, self.col)
    }
}

/// All cells of a `rows` x `cols` rectangle in row-major order.
pub fn rectangle(rows: i32, cols: i32) -> impl Iterator<Item = Cell> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
}
