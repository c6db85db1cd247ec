use anyhow::Result;
use clap::Parser;

use std::path::PathBuf;

use guard::{logging, parse_grid, read_puzzle, Walk};

#[derive(Parser)]
#[command(name = "guard", version, about = "Walk a patrolling guard off a grid")]
struct Cli {
    /// Puzzle file. Reads stdin when omitted.
    input: Option<PathBuf>,

    /// Print the grid with the guard's trail to stderr when done.
    #[arg(short, long)]
    render: bool,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let puzzle = read_puzzle(cli.input.as_deref())?;
    let (grid, start) = parse_grid(&puzzle)?;

    let mut walk = Walk::new(&grid, start);
    let report = walk.run();
    if cli.render {
        eprint!("{}", walk.frame());
    }
    println!("{report}");
    Ok(())
}
