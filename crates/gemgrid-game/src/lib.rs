//! Board generation and round control for gemgrid.
//!
//! [`BoardGen`] draws random boards and keeps only solvable ones: the finish
//! and every item must be reachable from the start. [`Round`] drives a single
//! play-through on such a board, from planning with one of the [`Mode`]s to
//! step-by-step playback.
//!
//! # Example
//!
//! ```
//! use gemgrid_game::{BoardGen, BoardGenConfig, Mode, Round};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let bg = BoardGen::new(BoardGenConfig::default(), SmallRng::seed_from_u64(7)).unwrap();
//! let mut round = Round::new(bg);
//! round.start(Mode::Free).unwrap();
//! let collected = round.run_to_end().unwrap();
//! assert!(collected <= round.items().len());
//! ```

mod boardgen;
mod round;

pub use boardgen::{BoardGen, BoardGenConfig, ConfigError, Generated, generate_board};
pub use round::{Mode, Phase, Round, RoundError, Step};

pub use gemgrid_paths::PlanError;
