//! Command-line driver shared by the `gemgrid` binary.
//!
//! Generates one board, plans a round in the requested mode and plays it
//! back on standard output, one line per step.

use std::fmt;
use std::io::Write;
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use gemgrid_core::{Board, CellState, Point};
use gemgrid_game::{BoardGen, BoardGenConfig, Mode, Round};
use rand::SeedableRng;
use rand::rngs::SmallRng;

const PATH_RUNE: char = 'o';

/// Generate a solvable gem board and walk it from corner to corner.
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Number of rows
    #[arg(short, long, default_value_t = 8)]
    pub rows: i32,

    /// Number of columns
    #[arg(short, long, default_value_t = 8)]
    pub cols: i32,

    /// Chance for each cell to be a wall
    #[arg(short, long, default_value_t = 0.25)]
    pub walls: f64,

    /// Chance for each non-wall cell to hold an item
    #[arg(short, long, default_value_t = 0.20)]
    pub items: f64,

    /// Number of boards to draw before falling back to an open board
    #[arg(short, long, default_value_t = 500)]
    pub attempts: usize,

    /// Reject boards with more items than this
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Planning policy
    #[arg(value_enum, short, long, default_value_t = ModeArg::Free)]
    pub mode: ModeArg,

    /// Number of items to collect in the target modes
    #[arg(short, long, allow_negative_numbers = true)]
    pub target: Option<i64>,

    /// Seed for the board generator; random when absent
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Pause between playback steps, in milliseconds
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,
}

/// Planning policies as spelled on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Free,
    All,
    Target,
    GreedyAll,
    GreedyTarget,
}

/// Argument combinations clap cannot reject on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageError {
    /// A target mode was chosen without `--target`.
    MissingTarget(ModeArg),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTarget(mode) => write!(f, "mode {mode:?} needs --target"),
        }
    }
}

impl std::error::Error for UsageError {}

impl Args {
    /// The round mode, with the target attached where one is needed.
    pub fn mode(&self) -> Result<Mode, UsageError> {
        let target = || self.target.ok_or(UsageError::MissingTarget(self.mode));
        Ok(match self.mode {
            ModeArg::Free => Mode::Free,
            ModeArg::All => Mode::All,
            ModeArg::Target => Mode::Target(target()?),
            ModeArg::GreedyAll => Mode::GreedyAll,
            ModeArg::GreedyTarget => Mode::GreedyTarget(target()?),
        })
    }

    pub fn board_config(&self) -> BoardGenConfig {
        BoardGenConfig {
            rows: self.rows,
            cols: self.cols,
            wall_probability: self.walls,
            item_probability: self.items,
            max_attempts: self.attempts,
            max_items: self.max_items,
        }
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

/// Initialise logging: `debug` with `--debug`, otherwise `RUST_LOG`,
/// defaulting to `info`.
pub fn init_logger(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Draw `board` with the cells of `path` marked, one line per row.
///
/// Items on the path keep their own rune.
pub fn render(board: &Board, path: &[Point]) -> String {
    let mut out = String::with_capacity(((board.cols() + 1) * board.rows()) as usize);
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let p = Point::from_row_col(row, col);
            let state = board.at(p).unwrap_or_default();
            if state == CellState::Open && path.contains(&p) {
                out.push(PATH_RUNE);
            } else {
                out.push(state.rune());
            }
        }
        out.push('\n');
    }
    out
}

/// Run one round as described by `args`, writing the report to `out`.
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let mode = args.mode()?;
    let bg = BoardGen::new(args.board_config(), args.rng())?;
    let mut round = Round::new(bg);

    writeln!(out, "{}", round.board())?;
    let items: Vec<String> = round.items().iter().map(|p| p.to_string()).collect();
    writeln!(out, "items ({}): {}", items.len(), items.join(" "))?;

    let path = round.start(mode)?.to_vec();
    writeln!(out, "{mode} path, {} steps:", path.len().saturating_sub(1))?;
    write!(out, "{}", render(round.board(), &path))?;

    let delay = Duration::from_millis(args.delay_ms);
    loop {
        let step = round.step()?;
        let mark = if step.collected { " *" } else { "" };
        writeln!(out, "{:>4} {}{mark}", round.cursor() - 1, step.pos)?;
        if step.finished {
            break;
        }
        if !delay.is_zero() {
            out.flush()?;
            thread::sleep(delay);
        }
    }
    writeln!(
        out,
        "collected {} of {} items",
        round.collected(),
        round.items().len()
    )?;
    Ok(())
}
