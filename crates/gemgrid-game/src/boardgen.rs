//! Random board generation.
//!
//! Boards are drawn cell by cell and validated afterwards: a board is kept
//! only if the finish and every item are reachable. Failed draws are retried
//! up to `max_attempts` times, after which a fully open, item-free board is
//! returned.

use std::fmt;

use gemgrid_core::{Board, CellState, ItemList};
use gemgrid_paths::{PathRange, UNREACHABLE};
use rand::{Rng, RngExt};

/// Parameters for [`BoardGen`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardGenConfig {
    /// Number of rows (M).
    pub rows: i32,
    /// Number of columns (N).
    pub cols: i32,
    /// Chance for each cell to be a wall.
    pub wall_probability: f64,
    /// Chance for each non-wall cell to hold an item.
    pub item_probability: f64,
    /// How many random boards to try before falling back.
    pub max_attempts: usize,
    /// Boards with more items than this are rejected like unsolvable ones.
    pub max_items: Option<usize>,
}

impl Default for BoardGenConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            wall_probability: 0.25,
            item_probability: 0.20,
            max_attempts: 500,
            max_items: None,
        }
    }
}

impl BoardGenConfig {
    /// Check that the parameters describe a board that can be drawn.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < 1 || self.cols < 1 || self.rows.checked_mul(self.cols).is_none() {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        for (name, value) in [
            ("wall", self.wall_probability),
            ("item", self.item_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { name, value });
            }
        }
        Ok(())
    }
}

/// Out-of-range generator parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidDimensions { rows: i32, cols: i32 },
    InvalidProbability { name: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "board must be between 1x1 and i32::MAX cells, got {rows}x{cols}")
            }
            Self::InvalidProbability { name, value } => {
                write!(f, "{name} probability must be within [0, 1], got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A generated board together with how it was obtained.
#[derive(Debug, Clone)]
pub struct Generated {
    pub board: Board,
    pub items: ItemList,
    /// Number of random boards drawn.
    pub attempts: usize,
    /// Whether every attempt failed and the open fallback board was used.
    pub fallback: bool,
}

/// Board generator driven by a random source.
pub struct BoardGen<R: Rng> {
    pub rng: R,
    config: BoardGenConfig,
    pr: PathRange,
}

impl<R: Rng> BoardGen<R> {
    /// Create a generator, rejecting out-of-range parameters.
    pub fn new(config: BoardGenConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let pr = PathRange::new(Board::new(config.rows, config.cols).bounds());
        Ok(Self { rng, config, pr })
    }

    /// The generator parameters.
    pub fn config(&self) -> &BoardGenConfig {
        &self.config
    }

    /// Draw one board without any validity guarantee.
    ///
    /// Start and finish are forced open whatever the draw.
    pub fn raw_board(&mut self) -> (Board, ItemList) {
        let mut board = Board::new(self.config.rows, self.config.cols);
        for p in board.bounds() {
            let state = if self.rng.random_bool(self.config.wall_probability) {
                CellState::Wall
            } else if self.rng.random_bool(self.config.item_probability) {
                CellState::Item
            } else {
                CellState::Open
            };
            // refused on start and finish, which stay open
            board.set(p, state);
        }
        let items = board.items();
        (board, items)
    }

    /// Whether the finish and every item can be reached from the start.
    ///
    /// Boards are undirected, so an item reachable from the start can also
    /// reach the finish whenever the finish is reachable: a single BFS from
    /// the start decides the whole predicate.
    pub fn is_valid(&mut self, board: &Board, items: &ItemList) -> bool {
        if self.config.max_items.is_some_and(|max| items.len() > max) {
            return false;
        }
        self.pr.set_range(board.bounds());
        self.pr.bfs_map(board, &[board.start()], i32::MAX);
        self.pr.bfs_at(board.finish()) != UNREACHABLE
            && items.iter().all(|d| self.pr.bfs_at(d) != UNREACHABLE)
    }

    /// Generate a board that passes [`is_valid`](Self::is_valid), or the open
    /// fallback board once the attempt budget is spent.
    pub fn generate(&mut self) -> Generated {
        for attempt in 1..=self.config.max_attempts {
            let (board, items) = self.raw_board();
            if self.is_valid(&board, &items) {
                log::debug!(
                    "generated {}x{} board with {} items after {attempt} attempt(s)",
                    board.rows(),
                    board.cols(),
                    items.len()
                );
                return Generated {
                    board,
                    items,
                    attempts: attempt,
                    fallback: false,
                };
            }
        }
        log::warn!(
            "no valid board in {} attempts, using an open board",
            self.config.max_attempts
        );
        Generated {
            board: Board::new(self.config.rows, self.config.cols),
            items: ItemList::new(),
            attempts: self.config.max_attempts,
            fallback: true,
        }
    }
}

/// One-shot board generation with explicit parameters.
pub fn generate_board(
    rng: &mut impl Rng,
    rows: i32,
    cols: i32,
    wall_probability: f64,
    item_probability: f64,
    max_attempts: usize,
) -> Result<(Board, ItemList), ConfigError> {
    let config = BoardGenConfig {
        rows,
        cols,
        wall_probability,
        item_probability,
        max_attempts,
        max_items: None,
    };
    let mut bg = BoardGen::new(config, rng)?;
    let generated = bg.generate();
    Ok((generated.board, generated.items))
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let config = BoardGenConfig {
            max_items: Some(12),
            ..BoardGenConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: BoardGenConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
