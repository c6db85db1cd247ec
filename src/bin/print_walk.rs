use anyhow::anyhow;

use std::path::Path;

use guard::{logging, parse_grid, read_puzzle, Step, Walk};

pub fn main() -> anyhow::Result<()> {
    // one optional arg: the puzzle file (stdin otherwise)
    logging::init();
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        return Err(anyhow!("usage: {} [PUZZLE_FILE]", args[0]));
    }

    let puzzle = read_puzzle(args.get(1).map(Path::new))?;
    let (grid, start) = parse_grid(&puzzle)?;
    let mut walk = Walk::new(&grid, start);

    print!("{}", walk.frame());
    while let Step::Moved { turned, .. } = walk.step() {
        if turned {
            println!("turned {}", walk.guard().heading);
        }
        print!("{}", walk.frame());
    }

    let report = walk.run();
    println!("{:?} after {} steps, {} distinct places",
             report.termination, report.steps, report.distinct_places);
    Ok(())
}
