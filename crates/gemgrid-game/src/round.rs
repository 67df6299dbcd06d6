//! Round control: one play-through from a fresh board to the finish.
//!
//! ```text
//! Idle ──start──▶ Planning ──path──▶ Animating ──finish──▶ Finished
//!   ▲                │                                        │
//!   └──── no path ───┘                                        │
//!   └──────────────────────────── reset ──────────────────────┘
//! ```
//!
//! Planning runs synchronously inside [`Round::start`]. Playback is driven by
//! the caller, one [`Round::step`] per tick; the round never schedules
//! anything itself.

use std::fmt;

use gemgrid_core::{Board, ItemList, Point};
use gemgrid_paths::{PathRange, PlanError, exact_count_path, max_collection_path};
use rand::Rng;

use crate::boardgen::BoardGen;

/// Which objective a round plans for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Shortest path, collecting as many items as a shortest path can.
    Free,
    /// Shortest path collecting every item.
    All,
    /// Shortest path collecting exactly this many items.
    Target(i64),
    /// Nearest-first approximation of [`Mode::All`].
    GreedyAll,
    /// Nearest-first approximation of [`Mode::Target`].
    GreedyTarget(i64),
}

impl Mode {
    /// Plan a path on `board` according to this mode.
    pub fn plan(
        self,
        pr: &mut PathRange,
        board: &Board,
        items: &ItemList,
    ) -> Result<Vec<Point>, PlanError> {
        let all = items.len() as i64;
        match self {
            Self::Free => max_collection_path(board, items),
            Self::All => exact_count_path(board, items, all),
            Self::Target(t) => exact_count_path(board, items, t),
            Self::GreedyAll => pr.greedy_path(board, items, all),
            Self::GreedyTarget(t) => pr.greedy_path(board, items, t),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::All => write!(f, "all"),
            Self::Target(t) => write!(f, "target {t}"),
            Self::GreedyAll => write!(f, "greedy all"),
            Self::GreedyTarget(t) => write!(f, "greedy target {t}"),
        }
    }
}

/// Where a round stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Planning,
    Animating,
    Finished,
}

/// Misuse of a [`Round`], or a failed plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundError {
    /// `start` was called outside [`Phase::Idle`].
    NotIdle(Phase),
    /// `step` was called outside [`Phase::Animating`].
    NotAnimating(Phase),
    /// Planning failed; the round is back in [`Phase::Idle`].
    Plan(PlanError),
}

impl fmt::Display for RoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotIdle(phase) => write!(f, "cannot start a round while {phase:?}"),
            Self::NotAnimating(phase) => write!(f, "cannot step a round while {phase:?}"),
            Self::Plan(e) => write!(f, "planning failed: {e}"),
        }
    }
}

impl std::error::Error for RoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Plan(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlanError> for RoundError {
    fn from(e: PlanError) -> Self {
        Self::Plan(e)
    }
}

/// The outcome of one playback step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Cell the walker moved onto.
    pub pos: Point,
    /// Whether an item was picked up there.
    pub collected: bool,
    /// Whether the round ended with this step.
    pub finished: bool,
}

/// A single round: board, plan and playback state.
pub struct Round<R: Rng> {
    bg: BoardGen<R>,
    pr: PathRange,
    board: Board,
    items: ItemList,
    phase: Phase,
    path: Vec<Point>,
    cursor: usize,
    collected: usize,
    last_failure: Option<PlanError>,
}

impl<R: Rng> Round<R> {
    /// Create a round on a freshly generated board.
    pub fn new(mut bg: BoardGen<R>) -> Self {
        let generated = bg.generate();
        let pr = PathRange::new(generated.board.bounds());
        Self {
            bg,
            pr,
            board: generated.board,
            items: generated.items,
            phase: Phase::Idle,
            path: Vec::new(),
            cursor: 0,
            collected: 0,
            last_failure: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The board as it stands; collected items have turned open.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Items of the board as generated, in index order.
    pub fn items(&self) -> &ItemList {
        &self.items
    }

    /// The planned path, empty until a plan succeeds.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Number of path cells played back so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Items picked up during playback.
    pub fn collected(&self) -> usize {
        self.collected
    }

    /// Why the most recent plan failed, if it did.
    pub fn last_failure(&self) -> Option<PlanError> {
        self.last_failure
    }

    /// Plan a path for `mode` and enter playback.
    ///
    /// On failure the round returns to [`Phase::Idle`] on the same board, so
    /// another mode or target can be tried; [`reset`](Self::reset) draws a
    /// new board.
    pub fn start(&mut self, mode: Mode) -> Result<&[Point], RoundError> {
        if self.phase != Phase::Idle {
            return Err(RoundError::NotIdle(self.phase));
        }
        self.phase = Phase::Planning;
        self.cursor = 0;
        self.collected = 0;
        log::info!("planning a {mode} round over {} items", self.items.len());

        match mode.plan(&mut self.pr, &self.board, &self.items) {
            Ok(path) => {
                log::info!("planned {} steps", path.len().saturating_sub(1));
                self.path = path;
                self.last_failure = None;
                self.phase = Phase::Animating;
                Ok(&self.path)
            }
            Err(e) => {
                log::info!("no plan for {mode}: {e}");
                self.path.clear();
                self.last_failure = Some(e);
                self.phase = Phase::Idle;
                Err(e.into())
            }
        }
    }

    /// Advance playback by one cell.
    ///
    /// The first step lands on the start cell. Items are collected as they
    /// are stepped on, and reaching the finish ends the round even if path
    /// cells remain.
    pub fn step(&mut self) -> Result<Step, RoundError> {
        if self.phase != Phase::Animating {
            return Err(RoundError::NotAnimating(self.phase));
        }
        let pos = self.path[self.cursor];
        self.cursor += 1;
        let collected = self.board.collect(pos);
        if collected {
            self.collected += 1;
        }
        let finished = pos == self.board.finish() || self.cursor >= self.path.len();
        if finished {
            self.phase = Phase::Finished;
            log::info!("round finished with {} items", self.collected);
        }
        Ok(Step {
            pos,
            collected,
            finished,
        })
    }

    /// Play back every remaining step. Returns the collected item count.
    pub fn run_to_end(&mut self) -> Result<usize, RoundError> {
        while !self.step()?.finished {}
        Ok(self.collected)
    }

    /// Discard the current board and state and return to a fresh
    /// [`Phase::Idle`] on a new board.
    pub fn reset(&mut self) {
        let generated = self.bg.generate();
        self.board = generated.board;
        self.items = generated.items;
        self.phase = Phase::Idle;
        self.path.clear();
        self.cursor = 0;
        self.collected = 0;
        self.last_failure = None;
        log::info!("round reset");
    }

    #[cfg(test)]
    fn with_board(bg: BoardGen<R>, board: Board) -> Self {
        let mut round = Self::new(bg);
        round.items = board.items();
        round.board = board;
        round
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn mode_round_trip() {
        for mode in [Mode::Free, Mode::Target(4), Mode::GreedyTarget(-1)] {
            let json = serde_json::to_string(&mode).unwrap();
            let back: Mode = serde_json::from_str(&json).unwrap();
            assert_eq!(mode, back);
        }
    }
}
