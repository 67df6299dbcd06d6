//! Generate a board and play one round in the terminal.
//!
//! Run: cargo run --bin gemgrid -- --mode all --seed 7

use clap::Parser;
use gemgrid_demo::{Args, init_logger, run};

fn main() {
    let args = Args::parse();
    init_logger(args.debug);

    let stdout = std::io::stdout();
    if let Err(e) = run(&args, &mut stdout.lock()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
