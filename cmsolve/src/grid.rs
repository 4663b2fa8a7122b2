use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{array::Array2D, dims::Coord};

/// State of a single maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Open,
    Wall,
}

impl Cell {
    pub fn is_open(self) -> bool {
        self == Cell::Open
    }

    pub fn is_wall(self) -> bool {
        self == Cell::Wall
    }

    pub fn toggled(self) -> Self {
        match self {
            Cell::Open => Cell::Wall,
            Cell::Wall => Cell::Open,
        }
    }
}

/// Orthogonal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which every search visits neighbours.
    pub fn get_in_order() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    pub fn to_coord(self) -> Coord {
        match self {
            Direction::Up => Coord(-1, 0),
            Direction::Down => Coord(1, 0),
            Direction::Left => Coord(0, -1),
            Direction::Right => Coord(0, 1),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("position {0} is outside of the grid")]
    OutOfBounds(Coord),
    #[error("start and end cells cannot be edited")]
    Endpoint(Coord),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("grid has no rows")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid cell character {ch:?} on row {row}")]
    InvalidChar { row: usize, ch: char },
}

/// Rectangular maze of open and wall cells.
///
/// The start is always the top-left cell and the end the bottom-right one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) cells: Array2D<Cell>,
}

impl Grid {
    /// Creates a fully open grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2D::new(Cell::Open, rows, cols),
        }
    }

    pub fn from_array(cells: Array2D<Cell>) -> Self {
        Self { cells }
    }

    /// Builds a grid from nested rows, `None` if the rows are empty or ragged.
    pub fn from_cells(rows: Vec<Vec<Cell>>) -> Option<Self> {
        let row_count = rows.len();
        let col_count = rows.first()?.len();
        if col_count == 0 || rows.iter().any(|r| r.len() != col_count) {
            return None;
        }

        let buf = rows.into_iter().flatten().collect();
        Array2D::from_buf(buf, row_count, col_count).map(Self::from_array)
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    /// Size as `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows(), self.cols())
    }

    pub fn start(&self) -> Coord {
        Coord::ZERO
    }

    pub fn end(&self) -> Coord {
        Coord(self.rows() as i32 - 1, self.cols() as i32 - 1)
    }

    pub fn is_endpoint(&self, pos: Coord) -> bool {
        pos == self.start() || pos == self.end()
    }

    pub fn in_bounds(&self, pos: Coord) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    pub fn get(&self, pos: Coord) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Out of bounds positions are never open.
    pub fn is_open(&self, pos: Coord) -> bool {
        self.get(pos).is_some_and(Cell::is_open)
    }

    /// Flips a cell between open and wall, returning the new state.
    ///
    /// Start and end cells are locked.
    pub fn toggle(&mut self, pos: Coord) -> Result<Cell, GridError> {
        if !self.in_bounds(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        if self.is_endpoint(pos) {
            return Err(GridError::Endpoint(pos));
        }

        let cell = &mut self.cells[pos];
        *cell = cell.toggled();
        Ok(*cell)
    }

    /// Open orthogonal neighbours in [`Direction::get_in_order`] order.
    pub fn neighbors(&self, pos: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::get_in_order()
            .into_iter()
            .map(move |dir| pos + dir.to_coord())
            .filter(|&next| self.is_open(next))
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    pub fn iter_pos(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter_pos()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter_rows()
    }

    /// Checks that `path` is a non-empty walk of orthogonal steps over open cells.
    pub fn is_valid_path(&self, path: &[Coord]) -> bool {
        !path.is_empty()
            && path.iter().all(|&pos| self.is_open(pos))
            && path.windows(2).all(|w| w[0].is_adjacent(w[1]))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for cell in row {
                f.write_str(if cell.is_wall() { "█" } else { " " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = ParseGridError;

    /// Parses rows of `0`/`.` (open) and `1`/`#` (wall); whitespace between cells is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();

        for (row, line) in s.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let cells = line
                .chars()
                .filter(|ch| !ch.is_whitespace())
                .map(|ch| match ch {
                    '0' | '.' => Ok(Cell::Open),
                    '1' | '#' => Ok(Cell::Wall),
                    ch => Err(ParseGridError::InvalidChar { row, ch }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first().map(Vec::len) {
                if cells.len() != first {
                    return Err(ParseGridError::Ragged {
                        row,
                        expected: first,
                        found: cells.len(),
                    });
                }
            }
            rows.push(cells);
        }

        Self::from_cells(rows).ok_or(ParseGridError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "
        0 1 0
        0 0 0
        1 1 0
    ";

    #[test]
    fn parse_and_query() {
        let grid: Grid = SAMPLE.parse().unwrap();
        assert_eq!(grid.size(), (3, 3));
        assert_eq!(grid.end(), Coord(2, 2));
        assert_eq!(grid.get(Coord(0, 1)), Some(Cell::Wall));
        assert_eq!(grid.wall_count(), 3);
        assert!(!grid.is_open(Coord(3, 0)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Grid>(), Err(ParseGridError::Empty));
        assert_eq!(
            "00\n0".parse::<Grid>(),
            Err(ParseGridError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            "0x".parse::<Grid>(),
            Err(ParseGridError::InvalidChar { row: 0, ch: 'x' })
        );
    }

    #[test]
    fn neighbors_follow_direction_order() {
        let grid = Grid::new(3, 3);
        let around: Vec<_> = grid.neighbors(Coord(1, 1)).collect();
        assert_eq!(around, vec![Coord(0, 1), Coord(2, 1), Coord(1, 0), Coord(1, 2)]);

        let grid: Grid = SAMPLE.parse().unwrap();
        let around: Vec<_> = grid.neighbors(Coord(1, 1)).collect();
        assert_eq!(around, vec![Coord(1, 0), Coord(1, 2)]);
    }

    #[test]
    fn toggle_locks_endpoints() {
        let mut grid = Grid::new(2, 2);
        assert_eq!(grid.toggle(Coord(0, 1)), Ok(Cell::Wall));
        assert_eq!(grid.toggle(Coord(0, 1)), Ok(Cell::Open));
        assert_eq!(grid.toggle(Coord(0, 0)), Err(GridError::Endpoint(Coord(0, 0))));
        assert_eq!(grid.toggle(Coord(1, 1)), Err(GridError::Endpoint(Coord(1, 1))));
        assert_eq!(grid.toggle(Coord(2, 0)), Err(GridError::OutOfBounds(Coord(2, 0))));
    }

    #[test]
    fn path_validation() {
        let grid: Grid = SAMPLE.parse().unwrap();
        assert!(grid.is_valid_path(&[Coord(0, 0), Coord(1, 0), Coord(1, 1)]));
        assert!(!grid.is_valid_path(&[Coord(0, 0), Coord(0, 1)]));
        assert!(!grid.is_valid_path(&[Coord(0, 0), Coord(1, 1)]));
        assert!(!grid.is_valid_path(&[]));
        assert!(grid.is_valid_path(&[Coord(0, 0)]));
    }

    #[test]
    fn display_draws_walls() {
        let grid: Grid = "01\n10".parse().unwrap();
        assert_eq!(grid.to_string(), " █\n█ \n");
    }
}
