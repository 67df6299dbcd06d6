//! The [`Board`]: an M×N grid of [`CellState`] values.
//!
//! The start cell is always the top-left corner and the finish cell the
//! bottom-right one. Both are kept [`CellState::Open`]: [`Board::set`] refuses
//! any other state there.

use std::fmt;

use crate::geom::{Point, Range};
use crate::items::ItemList;

/// The state of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Open,
    Wall,
    Item,
}

impl CellState {
    /// Whether a walker may stand on this cell.
    #[inline]
    pub const fn passable(self) -> bool {
        !matches!(self, Self::Wall)
    }

    /// Character used by [`Board`]'s text form.
    pub const fn rune(self) -> char {
        match self {
            Self::Open => '.',
            Self::Wall => '#',
            Self::Item => '*',
        }
    }

    /// Inverse of [`rune`](Self::rune).
    pub const fn from_rune(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Open),
            '#' => Some(Self::Wall),
            '*' => Some(Self::Item),
            _ => None,
        }
    }
}

/// A rectangular board with fixed start and finish corners.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: Vec<CellState>,
    rows: i32,
    cols: i32,
}

impl Board {
    /// Create a fully open board with `rows` rows and `cols` columns.
    ///
    /// Non-positive dimensions are clamped to 1 so that start and finish
    /// always exist.
    pub fn new(rows: i32, cols: i32) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            cells: vec![CellState::Open; (rows * cols) as usize],
            rows,
            cols,
        }
    }

    /// Parse a board from its text form, one line per row.
    ///
    /// Blank lines and surrounding whitespace are ignored. Start and finish
    /// cells must be `.`.
    pub fn parse(s: &str) -> Result<Self, BoardError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let Some(first) = lines.first() else {
            return Err(BoardError::Empty);
        };
        let cols = first.chars().count();
        let mut board = Board::new(lines.len() as i32, cols as i32);
        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(BoardError::InconsistentSize {
                    row: y,
                    expected: cols,
                    found: line.chars().count(),
                });
            }
            for (x, ch) in line.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                let state = CellState::from_rune(ch).ok_or(BoardError::InvalidRune { ch, pos: p })?;
                if !board.set(p, state) {
                    return Err(BoardError::BlockedEndpoint(p));
                }
            }
        }
        Ok(board)
    }

    /// Number of rows (M).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns (N).
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The bounding range of the board.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.cols, self.rows)
    }

    /// The start cell, `(0, 0)`.
    #[inline]
    pub fn start(&self) -> Point {
        Point::ZERO
    }

    /// The finish cell, `(M-1, N-1)`.
    #[inline]
    pub fn finish(&self) -> Point {
        Point::new(self.cols - 1, self.rows - 1)
    }

    /// Whether `p` is on the board.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    fn index(&self, p: Point) -> usize {
        (p.y * self.cols + p.x) as usize
    }

    /// Get the cell at a point, or `None` if out of bounds.
    pub fn at(&self, p: Point) -> Option<CellState> {
        if !self.contains(p) {
            return None;
        }
        Some(self.cells[self.index(p)])
    }

    /// Get the cell at `(row, col)`, or `None` if out of bounds.
    pub fn cell(&self, row: i32, col: i32) -> Option<CellState> {
        self.at(Point::from_row_col(row, col))
    }

    /// Whether `p` is on the board and not a wall.
    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(CellState::passable)
    }

    /// Set the cell at a point.
    ///
    /// Returns `false`, leaving the board untouched, if `p` is out of bounds
    /// or if it is the start or finish cell and `state` is not `Open`.
    pub fn set(&mut self, p: Point, state: CellState) -> bool {
        if !self.contains(p) {
            return false;
        }
        if (p == self.start() || p == self.finish()) && state != CellState::Open {
            return false;
        }
        let idx = self.index(p);
        self.cells[idx] = state;
        true
    }

    /// Turn an item cell into an open one. Returns whether an item was there.
    pub fn collect(&mut self, p: Point) -> bool {
        if self.at(p) != Some(CellState::Item) {
            return false;
        }
        let idx = self.index(p);
        self.cells[idx] = CellState::Open;
        true
    }

    /// Count how many cells equal `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }

    /// Iterate over `(Point, CellState)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// The item cells in row-major scan order.
    pub fn items(&self) -> ItemList {
        self.iter()
            .filter(|&(_, c)| c == CellState::Item)
            .map(|(p, _)| p)
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let c = self.cells[self.index(Point::new(x, y))];
                write!(f, "{}", c.rune())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// No non-blank line was found.
    Empty,
    /// Rows have inconsistent widths.
    InconsistentSize {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character other than `.`, `#` or `*` was found.
    InvalidRune { ch: char, pos: Point },
    /// The start or finish cell is not open.
    BlockedEndpoint(Point),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "board: no rows"),
            Self::InconsistentSize {
                row,
                expected,
                found,
            } => write!(
                f,
                "board: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidRune { ch, pos } => {
                write!(f, "board contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::BlockedEndpoint(p) => write!(f, "board: endpoint {p} must be open"),
        }
    }
}

impl std::error::Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "\
..#
.*.
#..";

    #[test]
    fn new_board_is_open() {
        let b = Board::new(3, 4);
        assert_eq!(b.rows(), 3);
        assert_eq!(b.cols(), 4);
        assert_eq!(b.count(CellState::Open), 12);
        assert_eq!(b.start(), Point::ZERO);
        assert_eq!(b.finish(), Point::from_row_col(2, 3));
    }

    #[test]
    fn degenerate_dimensions_are_clamped() {
        let b = Board::new(0, -3);
        assert_eq!((b.rows(), b.cols()), (1, 1));
        assert_eq!(b.start(), b.finish());
    }

    #[test]
    fn parse_and_query() {
        let b = Board::parse(SMALL).unwrap();
        assert_eq!(b.cell(0, 2), Some(CellState::Wall));
        assert_eq!(b.cell(1, 1), Some(CellState::Item));
        assert_eq!(b.cell(2, 2), Some(CellState::Open));
        assert_eq!(b.cell(3, 0), None);
        assert!(!b.passable(Point::from_row_col(2, 0)));
        assert!(b.passable(Point::from_row_col(1, 1)));
        assert_eq!(b.to_string(), format!("{SMALL}\n"));
    }

    #[test]
    fn endpoints_stay_open() {
        let mut b = Board::new(2, 2);
        assert!(!b.set(b.start(), CellState::Wall));
        assert!(!b.set(b.finish(), CellState::Item));
        assert!(b.set(Point::new(1, 0), CellState::Wall));
        assert!(!b.set(Point::new(5, 5), CellState::Wall));
        assert_eq!(b.at(b.start()), Some(CellState::Open));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Board::parse("  \n"), Err(BoardError::Empty));
        assert!(matches!(
            Board::parse("..\n..."),
            Err(BoardError::InconsistentSize { row: 1, .. })
        ));
        assert!(matches!(
            Board::parse(".x\n.."),
            Err(BoardError::InvalidRune { ch: 'x', .. })
        ));
        assert_eq!(
            Board::parse("#.\n.."),
            Err(BoardError::BlockedEndpoint(Point::ZERO))
        );
    }

    #[test]
    fn items_are_row_major_and_collectable() {
        let mut b = Board::parse(".*.\n*.*\n...").unwrap();
        let items = b.items();
        assert_eq!(
            items.as_slice(),
            &[
                Point::from_row_col(0, 1),
                Point::from_row_col(1, 0),
                Point::from_row_col(1, 2),
            ]
        );
        assert!(b.collect(Point::from_row_col(1, 0)));
        assert!(!b.collect(Point::from_row_col(1, 0)));
        assert_eq!(b.count(CellState::Item), 2);
    }
}
